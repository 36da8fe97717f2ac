//! Action dispatcher: confirmation gating, per-entity pending flags, and
//! success/failure feedback for state-changing requests.

use super::{ActionGroup, ActionKind, ActionRequest, Effect, ListState, Toast};
use crate::error::Result;
use crate::model::Entity;

/// Toast shown when the assign dialog is submitted without a staff member
pub const STAFF_REQUIRED: &str = "Staff Member is required!";

/// Open "are you sure?" dialog for a status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub kind: ActionKind,
    pub entity_id: String,
    /// The confirmed request is in flight
    pub loading: bool,
}

impl ConfirmDialog {
    pub fn prompt(&self) -> String {
        super::confirmation_prompt(self.kind, &self.entity_id)
    }
}

/// Open staff picker for one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignDialog {
    pub entity_id: String,
    /// Submit is disabled while this is set
    pub loading: bool,
}

impl<E: Entity> ListState<E> {
    pub(super) fn request_status_change(
        &mut self,
        kind: ActionKind,
        entity_id: String,
    ) -> Vec<Effect<E::Filter>> {
        if !kind.needs_confirmation() {
            tracing::warn!(%kind, "only status changes go through confirmation");
            return Vec::new();
        }
        if self.is_pending(&entity_id, ActionGroup::Status) {
            tracing::debug!(entity_id = %entity_id, "status change already in flight");
            return Vec::new();
        }
        self.confirm = Some(ConfirmDialog {
            kind,
            entity_id,
            loading: false,
        });
        Vec::new()
    }

    pub(super) fn confirm(&mut self) -> Vec<Effect<E::Filter>> {
        let Some(dialog) = self.confirm.as_mut() else {
            return Vec::new();
        };
        if dialog.loading {
            return Vec::new();
        }
        let Some(request) = ActionRequest::status_change(dialog.kind, dialog.entity_id.clone())
        else {
            return Vec::new();
        };
        dialog.loading = true;
        self.dispatch(request)
    }

    pub(super) fn cancel_dialog(&mut self) {
        // A request already sent keeps its pending flag until it completes
        if self.confirm.take().is_none() {
            self.assign = None;
        }
    }

    pub(super) fn open_assign(&mut self, entity_id: String) {
        if self.is_pending(&entity_id, ActionGroup::Assignment) {
            tracing::debug!(entity_id = %entity_id, "assignment already in flight");
            return;
        }
        self.assign = Some(AssignDialog {
            entity_id,
            loading: false,
        });
    }

    pub(super) fn submit_assign(&mut self, staff_id: Option<String>) -> Vec<Effect<E::Filter>> {
        let Some(dialog) = self.assign.as_mut() else {
            return Vec::new();
        };
        if dialog.loading {
            return Vec::new();
        }
        let Some(staff_id) = staff_id.filter(|s| !s.trim().is_empty()) else {
            self.toast = Some(Toast::error(STAFF_REQUIRED));
            return Vec::new();
        };
        dialog.loading = true;
        let request = ActionRequest::AssignStaff {
            booking_id: dialog.entity_id.clone(),
            staff_id,
        };
        self.dispatch(request)
    }

    pub(super) fn approve(&mut self, booking_id: String, staff_id: String) -> Vec<Effect<E::Filter>> {
        self.dispatch(ActionRequest::ApproveInvitation {
            booking_id,
            staff_id,
        })
    }

    /// Mark the request pending and hand it to the driver
    fn dispatch(&mut self, request: ActionRequest) -> Vec<Effect<E::Filter>> {
        let key = request.pending_key();
        if self.pending.contains(&key) {
            tracing::debug!(entity_id = %key.0, kind = %request.kind(), "action already pending");
            return Vec::new();
        }
        tracing::debug!(entity_id = %key.0, kind = %request.kind(), "dispatching action");
        self.pending.insert(key);
        vec![Effect::Perform(request)]
    }

    pub(super) fn action_completed(
        &mut self,
        request: ActionRequest,
        result: Result<()>,
    ) -> Vec<Effect<E::Filter>> {
        self.pending.remove(&request.pending_key());
        let kind = request.kind();
        let entity_id = request.entity_id();

        let confirm_matches = self
            .confirm
            .as_ref()
            .is_some_and(|d| d.entity_id == entity_id && d.kind.group() == kind.group());
        let assign_matches = kind == ActionKind::AssignStaff
            && self.assign.as_ref().is_some_and(|d| d.entity_id == entity_id);

        match result {
            Ok(()) => {
                tracing::info!(entity_id, %kind, "action succeeded");
                self.toast = Some(Toast::success(kind.success_message()));
                if confirm_matches {
                    self.confirm = None;
                }
                if assign_matches {
                    self.assign = None;
                }
                if self.mounted {
                    // Reflect the new state now rather than on the next tick
                    vec![self.issue_fetch()]
                } else {
                    Vec::new()
                }
            }
            Err(e) => {
                if let Some(effects) = self.check_unauthorized(&e) {
                    return effects;
                }
                tracing::error!(entity_id, %kind, error = %e, "action failed");
                self.toast = Some(Toast::error(e.user_message(kind.failure_fallback())));
                if confirm_matches {
                    self.confirm = None;
                }
                if assign_matches && let Some(dialog) = self.assign.as_mut() {
                    // Stays open so the operator can pick again
                    dialog.loading = false;
                }
                Vec::new()
            }
        }
    }
}
