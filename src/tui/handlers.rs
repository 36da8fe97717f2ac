//! Key handling for the bookings screen
//!
//! Keys are translated into controller events here so the mapping can be
//! tested without a terminal. Cursor movement is screen-local and never
//! reaches the controller.

use iocraft::prelude::KeyCode;

use crate::controller::{ActionKind, ListEvent, ListState};
use crate::model::{Booking, Entity};

/// Screen-local cursor positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    /// Highlighted row in the list
    pub row: usize,
    /// Highlighted staff member in the assign dialog
    pub staff: usize,
    /// Highlighted invitation in the detail panel
    pub invitation: usize,
}

impl Cursors {
    /// Pull every cursor back inside the rows it indexes
    pub fn clamp(&mut self, state: &ListState<Booking>) {
        self.row = clamp_index(self.row, state.items.len());
        self.staff = clamp_index(self.staff, state.staff.len());
        let invitations = state
            .selection
            .as_ref()
            .map_or(0, |b| b.booking_invitations.len());
        self.invitation = clamp_index(self.invitation, invitations);
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// What a key press asks of the screen
#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub events: Vec<ListEvent<Booking>>,
    pub quit: bool,
}

impl KeyOutcome {
    fn none() -> Self {
        Self::default()
    }

    fn event(event: ListEvent<Booking>) -> Self {
        Self {
            events: vec![event],
            quit: false,
        }
    }
}

/// Map one key press to controller events, moving cursors as a side effect
pub fn handle_key(code: KeyCode, state: &ListState<Booking>, cursors: &mut Cursors) -> KeyOutcome {
    if let Some(dialog) = &state.confirm {
        return match code {
            KeyCode::Char('y') | KeyCode::Enter if !dialog.loading => {
                KeyOutcome::event(ListEvent::Confirm)
            }
            KeyCode::Char('n') | KeyCode::Esc => KeyOutcome::event(ListEvent::CancelDialog),
            _ => KeyOutcome::none(),
        };
    }

    if let Some(dialog) = &state.assign {
        return match code {
            KeyCode::Char('j') | KeyCode::Down => {
                cursors.staff = clamp_index(cursors.staff + 1, state.staff.len());
                KeyOutcome::none()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                cursors.staff = cursors.staff.saturating_sub(1);
                KeyOutcome::none()
            }
            KeyCode::Enter if !dialog.loading => KeyOutcome::event(ListEvent::SubmitAssign {
                staff_id: state.staff.get(cursors.staff).map(|s| s.staff_id.clone()),
            }),
            KeyCode::Esc => KeyOutcome::event(ListEvent::CancelDialog),
            _ => KeyOutcome::none(),
        };
    }

    match code {
        KeyCode::Char('q') => KeyOutcome {
            events: vec![ListEvent::Unmount],
            quit: true,
        },
        KeyCode::Char('j') | KeyCode::Down => {
            cursors.row = clamp_index(cursors.row + 1, state.items.len());
            KeyOutcome::none()
        }
        KeyCode::Char('k') | KeyCode::Up => {
            cursors.row = cursors.row.saturating_sub(1);
            KeyOutcome::none()
        }
        KeyCode::Enter => match state.items.get(cursors.row) {
            Some(booking) => {
                cursors.invitation = 0;
                KeyOutcome::event(ListEvent::Select(booking.clone()))
            }
            None => KeyOutcome::none(),
        },
        KeyCode::Esc if state.selection.is_some() => KeyOutcome::event(ListEvent::ClearSelection),
        KeyCode::Tab => {
            let count = state
                .selection
                .as_ref()
                .map_or(0, |b| b.booking_invitations.len());
            if count > 0 {
                cursors.invitation = (cursors.invitation + 1) % count;
            }
            KeyOutcome::none()
        }
        KeyCode::Char('n') if state.pagination.has_next() => {
            KeyOutcome::event(ListEvent::SetPage {
                index: state.pagination.current + 1,
                size: state.pagination.page_size,
            })
        }
        KeyCode::Char('p') if state.pagination.has_prev() => {
            KeyOutcome::event(ListEvent::SetPage {
                index: state.pagination.current - 1,
                size: state.pagination.page_size,
            })
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('-') => {
            let size = state
                .pagination
                .step_page_size(!matches!(code, KeyCode::Char('-')));
            if size == state.pagination.page_size {
                return KeyOutcome::none();
            }
            cursors.row = 0;
            KeyOutcome::event(ListEvent::SetPage { index: 0, size })
        }
        KeyCode::Char('f') => {
            cursors.row = 0;
            KeyOutcome::event(ListEvent::SetFilter(state.filter.next()))
        }
        KeyCode::Char('a') => KeyOutcome::event(ListEvent::SetAutoRefresh(!state.auto_refresh)),
        KeyCode::Char('r') => KeyOutcome::event(ListEvent::Refresh),
        KeyCode::Char('c') | KeyCode::Char('x') => match target(state, cursors) {
            // Completed and cancelled bookings take no further status change
            Some(b) if !b.booking_status.is_terminal() => {
                let kind = if code == KeyCode::Char('c') {
                    ActionKind::MarkComplete
                } else {
                    ActionKind::MarkCancel
                };
                KeyOutcome::event(ListEvent::RequestStatusChange {
                    kind,
                    entity_id: b.id().to_string(),
                })
            }
            _ => KeyOutcome::none(),
        },
        KeyCode::Char('s') => match target(state, cursors) {
            Some(b) => {
                cursors.staff = 0;
                KeyOutcome::event(ListEvent::OpenAssign {
                    entity_id: b.id().to_string(),
                })
            }
            None => KeyOutcome::none(),
        },
        KeyCode::Char('v') => {
            let Some(booking) = &state.selection else {
                return KeyOutcome::none();
            };
            match booking.booking_invitations.get(cursors.invitation) {
                Some(inv) if booking.can_approve(inv) => KeyOutcome::event(ListEvent::Approve {
                    booking_id: booking.booking_id.clone(),
                    staff_id: inv.staff_id.clone(),
                }),
                _ => KeyOutcome::none(),
            }
        }
        _ => KeyOutcome::none(),
    }
}

/// Booking an action key applies to: the open detail, else the highlighted row
pub fn target<'a>(state: &'a ListState<Booking>, cursors: &Cursors) -> Option<&'a Booking> {
    state
        .selection
        .as_ref()
        .or_else(|| state.items.get(cursors.row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{AssignDialog, ConfirmDialog};
    use crate::model::{BookingFilter, BookingStatus, Invitation, StaffMember};

    fn booking(id: &str) -> Booking {
        Booking {
            booking_id: id.to_string(),
            ..Booking::default()
        }
    }

    fn state_with(ids: &[&str]) -> ListState<Booking> {
        let mut state = ListState::new(BookingFilter::All, 10, true);
        state.items = ids.iter().map(|id| booking(id)).collect();
        state.pagination.total = 30;
        state
    }

    #[test]
    fn test_cursor_stays_inside_rows() {
        let state = state_with(&["B1", "B2"]);
        let mut cursors = Cursors::default();
        handle_key(KeyCode::Char('j'), &state, &mut cursors);
        handle_key(KeyCode::Char('j'), &state, &mut cursors);
        assert_eq!(cursors.row, 1);
        handle_key(KeyCode::Up, &state, &mut cursors);
        handle_key(KeyCode::Up, &state, &mut cursors);
        assert_eq!(cursors.row, 0);
    }

    #[test]
    fn test_enter_selects_highlighted_row() {
        let state = state_with(&["B1", "B2"]);
        let mut cursors = Cursors {
            row: 1,
            ..Cursors::default()
        };
        let outcome = handle_key(KeyCode::Enter, &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::Select(b)] if b.booking_id == "B2"
        ));
    }

    #[test]
    fn test_paging_keys_respect_bounds() {
        let mut state = state_with(&["B1"]);
        let mut cursors = Cursors::default();

        let outcome = handle_key(KeyCode::Char('p'), &state, &mut cursors);
        assert!(outcome.events.is_empty());

        let outcome = handle_key(KeyCode::Char('n'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::SetPage { index: 1, size: 10 }]
        ));

        state.pagination.current = 2;
        let outcome = handle_key(KeyCode::Char('n'), &state, &mut cursors);
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_page_size_keys_step_through_options_and_reset_page() {
        let mut state = state_with(&["B1"]);
        state.pagination.current = 2;
        let mut cursors = Cursors::default();

        let outcome = handle_key(KeyCode::Char('+'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::SetPage { index: 0, size: 25 }]
        ));

        let outcome = handle_key(KeyCode::Char('-'), &state, &mut cursors);
        assert!(outcome.events.is_empty(), "10 is already the smallest size");
    }

    #[test]
    fn test_filter_key_cycles() {
        let state = state_with(&[]);
        let mut cursors = Cursors::default();
        let outcome = handle_key(KeyCode::Char('f'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::SetFilter(BookingFilter::NewBookings)]
        ));
    }

    #[test]
    fn test_status_keys_prefer_open_detail() {
        let mut state = state_with(&["B1", "B2"]);
        state.selection = Some(booking("B2"));
        let mut cursors = Cursors::default();

        let outcome = handle_key(KeyCode::Char('x'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::RequestStatusChange { kind: ActionKind::MarkCancel, entity_id }]
                if entity_id == "B2"
        ));
    }

    #[test]
    fn test_finished_bookings_take_no_status_change() {
        let mut state = state_with(&["B1", "B2"]);
        state.items[0].booking_status = BookingStatus::Completed;
        state.items[1].booking_status = BookingStatus::Cancelled;
        let mut cursors = Cursors::default();

        assert!(handle_key(KeyCode::Char('c'), &state, &mut cursors).events.is_empty());
        cursors.row = 1;
        assert!(handle_key(KeyCode::Char('x'), &state, &mut cursors).events.is_empty());

        // Assignment is still offered
        let outcome = handle_key(KeyCode::Char('s'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::OpenAssign { entity_id }] if entity_id == "B2"
        ));
    }

    #[test]
    fn test_confirm_dialog_captures_keys() {
        let mut state = state_with(&["B1"]);
        state.confirm = Some(ConfirmDialog {
            kind: ActionKind::MarkComplete,
            entity_id: "B1".to_string(),
            loading: false,
        });
        let mut cursors = Cursors::default();

        let outcome = handle_key(KeyCode::Char('q'), &state, &mut cursors);
        assert!(!outcome.quit);
        assert!(outcome.events.is_empty());

        let outcome = handle_key(KeyCode::Char('y'), &state, &mut cursors);
        assert!(matches!(outcome.events.as_slice(), [ListEvent::Confirm]));

        let outcome = handle_key(KeyCode::Char('n'), &state, &mut cursors);
        assert!(matches!(outcome.events.as_slice(), [ListEvent::CancelDialog]));
    }

    #[test]
    fn test_loading_confirm_ignores_second_yes() {
        let mut state = state_with(&["B1"]);
        state.confirm = Some(ConfirmDialog {
            kind: ActionKind::MarkComplete,
            entity_id: "B1".to_string(),
            loading: true,
        });
        let outcome = handle_key(KeyCode::Char('y'), &state, &mut Cursors::default());
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_assign_dialog_submits_highlighted_staff() {
        let mut state = state_with(&["B1"]);
        state.staff = vec![
            StaffMember {
                staff_id: "S1".to_string(),
                ..StaffMember::default()
            },
            StaffMember {
                staff_id: "S2".to_string(),
                ..StaffMember::default()
            },
        ];
        state.assign = Some(AssignDialog {
            entity_id: "B1".to_string(),
            loading: false,
        });
        let mut cursors = Cursors::default();

        handle_key(KeyCode::Char('j'), &state, &mut cursors);
        let outcome = handle_key(KeyCode::Enter, &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::SubmitAssign { staff_id: Some(id) }] if id == "S2"
        ));
    }

    #[test]
    fn test_assign_with_empty_roster_submits_nothing_selected() {
        let mut state = state_with(&["B1"]);
        state.assign = Some(AssignDialog {
            entity_id: "B1".to_string(),
            loading: false,
        });
        let outcome = handle_key(KeyCode::Enter, &state, &mut Cursors::default());
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::SubmitAssign { staff_id: None }]
        ));
    }

    #[test]
    fn test_approve_only_for_approvable_invitation() {
        let mut state = state_with(&["B1"]);
        let mut selected = booking("B1");
        selected.booking_status = BookingStatus::Assigned;
        selected.booking_invitations = vec![
            Invitation {
                staff_id: "S1".to_string(),
                booking_invitation_status: "PENDING".to_string(),
                ..Invitation::default()
            },
            Invitation {
                staff_id: "S2".to_string(),
                booking_invitation_status: "ACCEPTED".to_string(),
                ..Invitation::default()
            },
        ];
        state.selection = Some(selected);
        let mut cursors = Cursors::default();

        let outcome = handle_key(KeyCode::Char('v'), &state, &mut cursors);
        assert!(outcome.events.is_empty());

        handle_key(KeyCode::Tab, &state, &mut cursors);
        let outcome = handle_key(KeyCode::Char('v'), &state, &mut cursors);
        assert!(matches!(
            outcome.events.as_slice(),
            [ListEvent::Approve { booking_id, staff_id }] if booking_id == "B1" && staff_id == "S2"
        ));
    }

    #[test]
    fn test_quit_unmounts() {
        let state = state_with(&[]);
        let outcome = handle_key(KeyCode::Char('q'), &state, &mut Cursors::default());
        assert!(outcome.quit);
        assert!(matches!(outcome.events.as_slice(), [ListEvent::Unmount]));
    }

    #[test]
    fn test_clamp_after_shorter_page() {
        let state = state_with(&["B1"]);
        let mut cursors = Cursors {
            row: 7,
            staff: 3,
            invitation: 2,
        };
        cursors.clamp(&state);
        assert_eq!(cursors, Cursors::default());
    }
}
