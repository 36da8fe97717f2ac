//! One `cmd_*` function per CLI operation.

mod auth;
mod bookings;
mod catalog;
mod config;
mod customers;
pub mod interactive;
mod payments;
mod staff;

pub use auth::{cmd_login, cmd_logout};
pub use bookings::{
    BookingsLsOptions, cmd_bookings_approve, cmd_bookings_assign, cmd_bookings_browse,
    cmd_bookings_ls, cmd_bookings_mark_read, cmd_bookings_show, cmd_bookings_status,
};
pub use catalog::{cmd_services_ls, cmd_tag_categories_ls, cmd_tags_ls};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use customers::{cmd_customers_ls, cmd_customers_show};
pub use payments::cmd_payments_ls;
pub use staff::cmd_staff_ls;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{CentreError, Result};
use crate::model::BookingStatus;

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Authenticated client for the configured API
pub(crate) fn authenticated_client() -> Result<ApiClient> {
    let config = Config::load()?;
    ApiClient::from_config(&config)
}

/// Status text coloured by lifecycle state
pub(crate) fn colored_status(status: &BookingStatus, text: &str) -> String {
    match status {
        BookingStatus::New => text.yellow().to_string(),
        BookingStatus::Approved => text.cyan().to_string(),
        BookingStatus::Assigned => text.blue().to_string(),
        BookingStatus::Completed => text.green().to_string(),
        BookingStatus::Cancelled => text.dimmed().to_string(),
        BookingStatus::Other(_) => text.to_string(),
    }
}

/// Page size from the flag or the configured default, never zero
pub(crate) fn resolve_page_size(flag: Option<u32>, config: &Config) -> Result<u32> {
    match flag {
        Some(0) => Err(CentreError::InvalidInput(
            "page size must be greater than 0".to_string(),
        )),
        Some(size) => Ok(size),
        None => Ok(config.page_size),
    }
}

/// Footer line under a paged table
pub(crate) fn page_footer(shown: usize, page: u32, page_size: u32, total: u64) -> String {
    let pages = if total == 0 {
        1
    } else {
        total.div_ceil(u64::from(page_size.max(1)))
    };
    format!(
        "{shown} of {total} shown (page {} of {pages}, {page_size} per page)",
        page + 1
    )
}
