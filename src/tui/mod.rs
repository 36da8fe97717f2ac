//! Interactive terminal screens
//!
//! `bookings` is the live bookings list with its detail panel and dialogs.
//! All list behaviour lives in [`crate::controller`]; this module only draws
//! and forwards keys.

pub mod bookings;
pub mod components;
pub mod handlers;
pub mod theme;

pub use bookings::{BookingsScreen, BookingsScreenProps};
pub use theme::Theme;
