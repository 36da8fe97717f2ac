//! The HTTP collaborator.
//!
//! `ApiClient` handles the envelope convention, the session header and 401s.
//! Typed endpoints live in the per-resource modules, and [`ListBackend`] is the
//! seam the list controller consumes so it can be driven by fakes in tests.

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod client;
pub mod customers;
pub mod payments;
pub mod staff;

use std::future::Future;

use crate::controller::ActionRequest;
use crate::error::{CentreError, Result};
use crate::model::{Entity, Page, PageQuery, StaffMember};

pub use bookings::BookingsBackend;
pub use client::{API_PREFIX, ApiClient, UnauthorizedHook, decode_envelope};
pub use customers::CustomersBackend;
pub use payments::PaymentsBackend;

/// Data source for one list screen
pub trait ListBackend<E: Entity>: Send + Sync + 'static {
    /// Fetch one page for the given coordinates
    fn fetch_page(&self, query: &PageQuery<E::Filter>)
    -> impl Future<Output = Result<Page<E>>> + Send;

    /// Record that an operator has seen the entity
    fn mark_read(&self, _id: &str) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }

    /// Execute one state-changing action
    fn perform(&self, request: &ActionRequest) -> impl Future<Output = Result<()>> + Send {
        let kind = request.kind();
        async move {
            Err(CentreError::InvalidInput(format!(
                "{kind} is not available on this list"
            )))
        }
    }

    /// Staff roster offered by the assign dialog
    fn list_staff(&self) -> impl Future<Output = Result<Vec<StaffMember>>> + Send {
        async { Ok(Vec::new()) }
    }
}
