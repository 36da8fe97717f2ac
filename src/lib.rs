pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod paths;
pub mod tui;

pub use api::{ApiClient, BookingsBackend, CustomersBackend, ListBackend, PaymentsBackend};
pub use config::Config;
pub use controller::{ListDriver, ListEvent, ListHandle, ListOptions, ListState};
pub use error::{CentreError, Result};
pub use model::{
    Booking, BookingFilter, BookingStatus, Customer, Page, PageQuery, Payment, StaffMember,
};
