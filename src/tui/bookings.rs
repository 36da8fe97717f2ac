//! Bookings screen (`command-centre bookings browse`)
//!
//! The screen owns no list logic. It mirrors the state published by a
//! [`ListHandle`], turns key presses into controller events, and draws.

use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::controller::{ListEvent, ListHandle, ListState};
use crate::model::{Booking, BookingFilter, Entity};
use crate::tui::components::{
    AssignModal, BookingDetail, BookingList, ConfirmModal, Footer, Header, assign_shortcuts,
    confirm_shortcuts, list_shortcuts, render_toast,
};
use crate::tui::handlers::{Cursors, KeyOutcome, handle_key, target};
use crate::tui::theme::theme;

/// How often the screen checks whether the toast has run its course
const TOAST_CHECK: Duration = Duration::from_millis(250);

#[derive(Default, Props)]
pub struct BookingsScreenProps {
    /// Connection to a running list driver
    pub handle: Option<ListHandle<Booking>>,
}

/// Main bookings component
///
/// Layout:
/// ```text
/// +------------------------------------------+
/// | Header                                    |
/// +----------------------+-------------------+
/// | BookingList          | BookingDetail     |
/// |                      | (when selected)   |
/// +----------------------+-------------------+
/// | Toast                                     |
/// | Footer                                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn BookingsScreen<'a>(
    props: &BookingsScreenProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let initial = props.handle.clone();
    let mut list: State<ListState<Booking>> = hooks.use_state(move || match initial {
        Some(handle) => handle.snapshot(),
        None => ListState::new(BookingFilter::default(), 25, false),
    });
    let mut cursors: State<Cursors> = hooks.use_state(Cursors::default);
    let mut should_exit = hooks.use_state(|| false);

    // Mirror every published state; the driver going away closes the screen
    let watcher = props.handle.clone();
    hooks.use_future(async move {
        let Some(mut handle) = watcher else {
            return;
        };
        while let Some(next) = handle.changed().await {
            list.set(next);
        }
        should_exit.set(true);
    });

    let expiry = props.handle.clone();
    hooks.use_future(async move {
        let Some(handle) = expiry else {
            return;
        };
        loop {
            tokio::time::sleep(TOAST_CHECK).await;
            let expired = list
                .read()
                .toast
                .as_ref()
                .filter(|t| t.is_expired(Instant::now()))
                .map(|t| t.timestamp);
            if let Some(shown_at) = expired
                && !handle.send(ListEvent::DismissToast { shown_at })
            {
                break;
            }
        }
    });

    hooks.use_terminal_events({
        let handle = props.handle.clone();
        move |event| {
            let TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                return;
            };
            if kind == KeyEventKind::Release {
                return;
            }

            let outcome = if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)
            {
                KeyOutcome {
                    events: vec![ListEvent::Unmount],
                    quit: true,
                }
            } else {
                let state = list.read();
                let mut moved = cursors.get();
                let outcome = handle_key(code, &state, &mut moved);
                drop(state);
                cursors.set(moved);
                outcome
            };

            if let Some(handle) = &handle {
                for event in outcome.events {
                    handle.send(event);
                }
            }
            if outcome.quit {
                should_exit.set(true);
            }
        }
    });

    let state = list.read().clone();

    if should_exit.get() || state.signed_out {
        system.exit();
    }

    let mut clamped = cursors.get();
    clamped.clamp(&state);
    if clamped != cursors.get() {
        cursors.set(clamped);
    }

    let theme = theme();
    let toast_lines = if state.toast.is_some() { 3 } else { 0 };
    // Header, footer, pane borders, column header and page line
    let list_height = (height as usize).saturating_sub(6 + toast_lines);

    let pagination = state.pagination;
    let page_label = format!(
        "Page {} of {} · {} per page · {} shown",
        pagination.current + 1,
        pagination.page_count(),
        pagination.page_size,
        state.items.len()
    );

    let selected_id = state.selection.as_ref().map(|b| b.id().to_string());
    let pending: Vec<String> = match &selected_id {
        Some(id) => {
            let mut groups: Vec<_> = state
                .pending
                .iter()
                .filter(|(entity, _)| entity == id)
                .map(|(_, group)| *group)
                .collect();
            groups.sort();
            groups
                .into_iter()
                .map(|g| format!("{g:?}").to_lowercase())
                .collect()
        }
        None => Vec::new(),
    };

    let shortcuts = if state.confirm.is_some() {
        confirm_shortcuts()
    } else if state.assign.is_some() {
        assign_shortcuts()
    } else {
        let status_actions =
            target(&state, &clamped).is_some_and(|b| !b.booking_status.is_terminal());
        list_shortcuts(state.selection.is_some(), status_actions)
    };

    let confirm = state.confirm.clone();
    let assign = state.assign.clone();
    let has_selection = state.selection.is_some();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            Header(
                subtitle: "Bookings".to_string(),
                filter: state.filter.label().to_string(),
                auto_refresh: state.auto_refresh,
                loading: state.is_loading(),
                total: pagination.total,
            )

            View(
                flex_grow: 1.0,
                flex_direction: FlexDirection::Row,
                width: 100pct,
            ) {
                View(
                    width: if has_selection { Size::Percent(55.0) } else { Size::Percent(100.0) },
                    height: 100pct,
                ) {
                    BookingList(
                        bookings: state.items.clone(),
                        cursor: clamped.row,
                        selected_id: selected_id.clone(),
                        visible_height: list_height,
                        loading: state.is_loading(),
                        page_label,
                        has_focus: confirm.is_none() && assign.is_none(),
                    )
                }

                #(has_selection.then(|| element! {
                    View(flex_grow: 1.0, height: 100pct) {
                        BookingDetail(
                            booking: state.selection.clone(),
                            invitation_cursor: clamped.invitation,
                            pending: pending.clone(),
                        )
                    }
                }))
            }

            #(render_toast(&state.toast))

            Footer(shortcuts)

            #(confirm.map(|dialog| element! {
                ConfirmModal(prompt: dialog.prompt(), loading: dialog.loading)
            }))

            #(assign.map(|dialog| element! {
                AssignModal(
                    booking_id: dialog.entity_id.clone(),
                    staff: state.staff.clone(),
                    cursor: clamped.staff,
                    loading: dialog.loading,
                )
            }))
        }
    }
}
