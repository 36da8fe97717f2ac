use std::collections::HashSet;

use super::dispatcher::{AssignDialog, ConfirmDialog};
use super::{ActionGroup, Effect, ListEvent, Toast};
use crate::error::CentreError;
use crate::model::{Entity, PageQuery, Pagination, StaffMember};

/// Everything a list/detail screen renders from
#[derive(Debug, Clone)]
pub struct ListState<E: Entity> {
    /// Rows of the last applied page
    pub items: Vec<E>,
    pub pagination: Pagination,
    pub filter: E::Filter,
    /// Snapshot of the entity shown in the detail panel
    pub selection: Option<E>,
    pub auto_refresh: bool,
    /// In-flight mutations, keyed by entity and action group
    pub pending: HashSet<(String, ActionGroup)>,
    pub confirm: Option<ConfirmDialog>,
    pub assign: Option<AssignDialog>,
    pub toast: Option<Toast>,
    pub staff: Vec<StaffMember>,
    /// The server rejected the session; the screen should close
    pub signed_out: bool,

    pub(super) mounted: bool,
    pub(super) in_flight: usize,
    pub(super) next_seq: u64,
    pub(super) poll_epoch: u64,
    /// Entity the last mark-read was issued for
    pub(super) mark_read_for: Option<String>,
}

impl<E: Entity> ListState<E> {
    pub fn new(filter: E::Filter, page_size: u32, auto_refresh: bool) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(page_size),
            filter,
            selection: None,
            auto_refresh,
            pending: HashSet::new(),
            confirm: None,
            assign: None,
            toast: None,
            staff: Vec::new(),
            signed_out: false,
            mounted: false,
            in_flight: 0,
            next_seq: 0,
            poll_epoch: 0,
            mark_read_for: None,
        }
    }

    /// A fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Epoch of the timer that is allowed to trigger fetches
    pub fn poll_epoch(&self) -> u64 {
        self.poll_epoch
    }

    /// Coordinates the next fetch targets
    pub fn current_query(&self) -> PageQuery<E::Filter> {
        PageQuery {
            filter: self.filter.clone(),
            page: self.pagination.current,
            page_size: self.pagination.page_size,
        }
    }

    pub fn is_pending(&self, entity_id: &str, group: ActionGroup) -> bool {
        self.pending.contains(&(entity_id.to_string(), group))
    }

    pub fn is_selected(&self, entity_id: &str) -> bool {
        self.selection.as_ref().is_some_and(|s| s.id() == entity_id)
    }

    /// Advance the state by one event, returning the I/O to perform
    pub fn apply(&mut self, event: ListEvent<E>) -> Vec<Effect<E::Filter>> {
        if self.signed_out {
            tracing::debug!("ignoring event after sign-out");
            return Vec::new();
        }

        match event {
            ListEvent::Mount => self.mount(),
            ListEvent::Unmount => self.unmount(),
            ListEvent::Tick { epoch } => self.tick(epoch),
            ListEvent::Refresh => self.refresh(),
            ListEvent::SetFilter(filter) => self.set_filter(filter),
            ListEvent::SetPage { index, size } => self.set_page(index, size),
            ListEvent::SetAutoRefresh(on) => self.set_auto_refresh(on),

            ListEvent::Select(entity) => self.select(entity),
            ListEvent::ClearSelection => {
                self.clear_selection();
                Vec::new()
            }

            ListEvent::RequestStatusChange { kind, entity_id } => {
                self.request_status_change(kind, entity_id)
            }
            ListEvent::Confirm => self.confirm(),
            ListEvent::CancelDialog => {
                self.cancel_dialog();
                Vec::new()
            }
            ListEvent::OpenAssign { entity_id } => {
                self.open_assign(entity_id);
                Vec::new()
            }
            ListEvent::SubmitAssign { staff_id } => self.submit_assign(staff_id),
            ListEvent::Approve {
                booking_id,
                staff_id,
            } => self.approve(booking_id, staff_id),
            ListEvent::DismissToast { shown_at } => {
                // A newer toast may have replaced the one that expired
                if self.toast.as_ref().is_some_and(|t| t.timestamp == shown_at) {
                    self.toast = None;
                }
                Vec::new()
            }

            ListEvent::FetchCompleted { request, result } => self.fetch_completed(request, result),
            ListEvent::MarkReadCompleted { id, result } => self.mark_read_completed(id, result),
            ListEvent::ActionCompleted { request, result } => {
                self.action_completed(request, result)
            }
            ListEvent::StaffLoaded(result) => self.staff_loaded(result),
        }
    }

    /// Route a 401 to the sign-out path. Returns the effects if it was one.
    pub(super) fn check_unauthorized(
        &mut self,
        error: &CentreError,
    ) -> Option<Vec<Effect<E::Filter>>> {
        if !matches!(error, CentreError::Unauthorized) {
            return None;
        }
        tracing::warn!("session rejected by server; signing out");
        self.signed_out = true;
        self.mounted = false;
        self.poll_epoch += 1;
        self.toast = Some(Toast::error(
            "Session expired. Run: command-centre login --email <email>",
        ));
        Some(vec![Effect::StopPolling])
    }
}
