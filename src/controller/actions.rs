//! State-changing requests against a single booking.
//!
//! Every per-row action is one variant of [`ActionRequest`] carrying just the
//! payload it needs. The dispatcher matches on it exhaustively, so adding an
//! action means the compiler points at every place that has to handle it.

use std::fmt;

use serde::Serialize;

/// Which pending flag an action occupies. At most one action per
/// `(entity, group)` may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ActionGroup {
    /// Mark complete / mark cancel
    Status,
    Assignment,
    Approval,
}

/// Shape of an action, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    AssignStaff,
    MarkComplete,
    MarkCancel,
    ApproveInvitation,
}

impl ActionKind {
    pub fn group(&self) -> ActionGroup {
        match self {
            ActionKind::MarkComplete | ActionKind::MarkCancel => ActionGroup::Status,
            ActionKind::AssignStaff => ActionGroup::Assignment,
            ActionKind::ApproveInvitation => ActionGroup::Approval,
        }
    }

    /// Status changes are two-step and need an explicit confirmation
    pub fn needs_confirmation(&self) -> bool {
        self.group() == ActionGroup::Status
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ActionKind::AssignStaff => "Booking assigned successfully!",
            ActionKind::MarkComplete => "Marked as Completed successfully!",
            ActionKind::MarkCancel => "Marked as cancelled successfully!",
            ActionKind::ApproveInvitation => "Updated successfully!",
        }
    }

    /// Toast text when the server gives no message of its own
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            ActionKind::AssignStaff => "Failed in assigning booking!",
            ActionKind::MarkComplete => "Failed in marking as completed!",
            ActionKind::MarkCancel => "Failed in marking as cancelled!",
            ActionKind::ApproveInvitation => crate::error::UPDATE_FALLBACK,
        }
    }

    /// Word used in the confirmation prompt
    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::AssignStaff => "assigned",
            ActionKind::MarkComplete => "completed",
            ActionKind::MarkCancel => "cancelled",
            ActionKind::ApproveInvitation => "approved",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::AssignStaff => "assign-staff",
            ActionKind::MarkComplete => "mark-complete",
            ActionKind::MarkCancel => "mark-cancel",
            ActionKind::ApproveInvitation => "approve-invitation",
        };
        write!(f, "{s}")
    }
}

/// One mutation, with its payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ActionRequest {
    AssignStaff { booking_id: String, staff_id: String },
    MarkComplete { booking_id: String },
    MarkCancel { booking_id: String },
    ApproveInvitation { booking_id: String, staff_id: String },
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::AssignStaff { .. } => ActionKind::AssignStaff,
            ActionRequest::MarkComplete { .. } => ActionKind::MarkComplete,
            ActionRequest::MarkCancel { .. } => ActionKind::MarkCancel,
            ActionRequest::ApproveInvitation { .. } => ActionKind::ApproveInvitation,
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            ActionRequest::AssignStaff { booking_id, .. }
            | ActionRequest::MarkComplete { booking_id }
            | ActionRequest::MarkCancel { booking_id }
            | ActionRequest::ApproveInvitation { booking_id, .. } => booking_id,
        }
    }

    /// Key of the pending flag this request holds while in flight
    pub fn pending_key(&self) -> (String, ActionGroup) {
        (self.entity_id().to_string(), self.kind().group())
    }

    /// Build a payload-free status change for `kind`
    pub fn status_change(kind: ActionKind, booking_id: impl Into<String>) -> Option<Self> {
        let booking_id = booking_id.into();
        match kind {
            ActionKind::MarkComplete => Some(ActionRequest::MarkComplete { booking_id }),
            ActionKind::MarkCancel => Some(ActionRequest::MarkCancel { booking_id }),
            ActionKind::AssignStaff | ActionKind::ApproveInvitation => None,
        }
    }
}

/// Prompt shown before a status change is dispatched
pub fn confirmation_prompt(kind: ActionKind, booking_id: &str) -> String {
    format!(
        "Are you sure to mark this booking ({booking_id}) as {}?",
        kind.verb()
    )
}
