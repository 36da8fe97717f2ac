//! List fetching and the auto-refresh schedule

use super::{Effect, FetchRequest, ListState, Toast};
use crate::error::{FETCH_FALLBACK, Result};
use crate::model::{Entity, Page, StaffMember};

impl<E: Entity> ListState<E> {
    /// Issue a fetch for the current coordinates
    pub(super) fn issue_fetch(&mut self) -> Effect<E::Filter> {
        self.next_seq += 1;
        self.in_flight += 1;
        let request = FetchRequest {
            seq: self.next_seq,
            query: self.current_query(),
        };
        tracing::debug!(seq = request.seq, page = request.query.page, "issuing fetch");
        Effect::Fetch(request)
    }

    /// Invalidate the running timer and, if auto-refresh is on, start a new one.
    ///
    /// Bumping the epoch first means ticks already queued by the old timer
    /// are ignored even if they arrive after the restart.
    pub(super) fn restart_polling(&mut self) -> Effect<E::Filter> {
        self.poll_epoch += 1;
        if self.auto_refresh && self.mounted {
            Effect::StartPolling {
                epoch: self.poll_epoch,
            }
        } else {
            Effect::StopPolling
        }
    }

    pub(super) fn mount(&mut self) -> Vec<Effect<E::Filter>> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![self.issue_fetch(), self.restart_polling(), Effect::LoadStaff]
    }

    pub(super) fn unmount(&mut self) -> Vec<Effect<E::Filter>> {
        self.mounted = false;
        self.poll_epoch += 1;
        vec![Effect::StopPolling]
    }

    pub(super) fn tick(&mut self, epoch: u64) -> Vec<Effect<E::Filter>> {
        if !self.mounted || !self.auto_refresh || epoch != self.poll_epoch {
            tracing::debug!(epoch, current = self.poll_epoch, "ignoring stale poll tick");
            return Vec::new();
        }
        vec![self.issue_fetch()]
    }

    /// Manual refresh: one fetch, and the interval starts over from now
    pub(super) fn refresh(&mut self) -> Vec<Effect<E::Filter>> {
        if !self.mounted {
            return Vec::new();
        }
        if self.auto_refresh {
            vec![self.issue_fetch(), self.restart_polling()]
        } else {
            vec![self.issue_fetch()]
        }
    }

    pub(super) fn set_auto_refresh(&mut self, on: bool) -> Vec<Effect<E::Filter>> {
        if self.auto_refresh == on {
            return Vec::new();
        }
        self.auto_refresh = on;
        if !self.mounted {
            return Vec::new();
        }
        if on {
            // Catch up immediately rather than waiting a full period
            vec![self.issue_fetch(), self.restart_polling()]
        } else {
            vec![self.restart_polling()]
        }
    }

    pub(super) fn fetch_completed(
        &mut self,
        request: FetchRequest<E::Filter>,
        result: Result<Page<E>>,
    ) -> Vec<Effect<E::Filter>> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let page = match result {
            Ok(page) => Some(page),
            Err(e) => {
                if let Some(effects) = self.check_unauthorized(&e) {
                    return effects;
                }
                if request.query == self.current_query() {
                    tracing::error!(seq = request.seq, error = %e, "failed to fetch page");
                    // Previous page stays on screen
                    self.toast = Some(Toast::error(e.user_message(FETCH_FALLBACK)));
                    return Vec::new();
                }
                tracing::warn!(
                    seq = request.seq,
                    error = %e,
                    "fetch for superseded coordinates failed"
                );
                None
            }
        };

        let Some(page) = page else {
            return Vec::new();
        };
        if request.query != self.current_query() {
            tracing::warn!(
                seq = request.seq,
                page = request.query.page,
                "discarding response for superseded coordinates"
            );
            return Vec::new();
        }

        let page = page.bounded(self.pagination.page_size);
        self.items = page.items;
        self.pagination.total = page.total;
        self.reconcile_selection();
        Vec::new()
    }

    pub(super) fn staff_loaded(&mut self, result: Result<Vec<StaffMember>>) -> Vec<Effect<E::Filter>> {
        match result {
            Ok(staff) => {
                self.staff = staff;
                Vec::new()
            }
            Err(e) => {
                if let Some(effects) = self.check_unauthorized(&e) {
                    return effects;
                }
                tracing::warn!(error = %e, "failed to load staff roster");
                Vec::new()
            }
        }
    }
}
