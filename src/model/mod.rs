//! Records served by the operations API.
//!
//! Every list screen works on an [`Entity`]: a record with an opaque string
//! ID, an optional unread flag, and a filter type that narrows list fetches.

pub mod booking;
pub mod catalog;
pub mod customer;
pub mod page;
pub mod payment;
pub mod staff;

use std::fmt::Debug;

use serde::{Deserialize, Deserializer};

pub use booking::{
    Assignee, Booking, BookingFilter, BookingPayment, BookingStatus, FamilyMember, Invitation,
};
pub use catalog::{Service, ServiceName, Tag, TagCategory};
pub use customer::{Address, Customer};
pub use page::{Page, PageQuery, Pagination, PAGE_SIZE_OPTIONS};
pub use payment::Payment;
pub use staff::StaffMember;

/// A record shown in a list/detail screen
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Categorical filter constraining list fetches. `()` for unfiltered lists.
    type Filter: Clone + Debug + Default + PartialEq + Send + Sync + 'static;

    /// Opaque identifier, stable across refetches
    fn id(&self) -> &str;

    /// Whether the record has been seen by an operator
    fn is_read(&self) -> bool {
        true
    }

    /// Flip the local read flag after the server accepted mark-read
    fn mark_read(&mut self) {}
}

/// Treat JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept IDs sent either as JSON strings or as numbers
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Int(n)) => n.to_string(),
        Some(RawId::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

/// `₹ <amount>` (zero included), or `--` when no amount was sent
pub fn rupees(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format!("₹ {amount}"),
        None => "--".to_string(),
    }
}

/// Render an optional/blank value the way the list tables do
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}
