//! Generic list/detail controller.
//!
//! [`ListState`] is a plain struct advanced by [`ListState::apply`], a pure
//! reducer that never performs I/O. Every request it wants made comes back as
//! an [`Effect`], which [`ListDriver`] executes on the tokio runtime before
//! feeding the completion back in as another [`ListEvent`].
//!
//! Ordering rule: a fetch completion only applies if it was issued for the
//! coordinates (filter, page, page size) that are current when it lands.
//! Completions for the current coordinates apply in completion order.

pub mod actions;
pub mod dispatcher;
pub mod driver;
pub mod fetch;
pub mod filter;
pub mod poller;
pub mod selection;
pub mod state;
pub mod toast;

use std::time::Instant;

use crate::error::Result;
use crate::model::{Entity, Page, PageQuery, StaffMember};

pub use actions::{ActionGroup, ActionKind, ActionRequest, confirmation_prompt};
pub use dispatcher::{AssignDialog, ConfirmDialog, STAFF_REQUIRED};
pub use driver::{ListDriver, ListHandle, ListOptions};
pub use poller::PollTimer;
pub use state::ListState;
pub use toast::{Toast, ToastLevel};

/// A list fetch tagged with the coordinates it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<F> {
    pub seq: u64,
    pub query: PageQuery<F>,
}

/// Inputs to the reducer: user intents and async completions
#[derive(Debug)]
pub enum ListEvent<E: Entity> {
    /// Screen became visible: first fetch, start polling, load the staff roster
    Mount,
    /// Screen went away: stop polling
    Unmount,
    /// Poll timer fired
    Tick { epoch: u64 },
    /// One-off manual refresh
    Refresh,
    SetFilter(E::Filter),
    SetPage { index: u32, size: u32 },
    SetAutoRefresh(bool),

    Select(E),
    ClearSelection,

    /// Open the confirmation dialog for a status change
    RequestStatusChange { kind: ActionKind, entity_id: String },
    /// Second, explicit confirmation of the open status change
    Confirm,
    /// Close whichever dialog is open without doing anything
    CancelDialog,
    OpenAssign { entity_id: String },
    SubmitAssign { staff_id: Option<String> },
    Approve { booking_id: String, staff_id: String },
    /// Toast shown at `shown_at` has run its course
    DismissToast { shown_at: Instant },

    FetchCompleted {
        request: FetchRequest<E::Filter>,
        result: Result<Page<E>>,
    },
    MarkReadCompleted { id: String, result: Result<()> },
    ActionCompleted {
        request: ActionRequest,
        result: Result<()>,
    },
    StaffLoaded(Result<Vec<StaffMember>>),
}

/// Work the reducer asks the driver to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<F> {
    Fetch(FetchRequest<F>),
    /// Abort any running timer, then start one tagged with `epoch`
    StartPolling { epoch: u64 },
    StopPolling,
    MarkRead(String),
    Perform(ActionRequest),
    LoadStaff,
}
