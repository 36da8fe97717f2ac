mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use command_centre::controller::{ActionKind, ActionRequest, ListEvent, STAFF_REQUIRED, ToastLevel};
use command_centre::model::{BookingFilter, BookingStatus, Entity};

use common::{FakeBackend, POLL, booking, bookings, driver, invitation};

fn forty_with_unread_b17() -> Vec<command_centre::model::Booking> {
    let mut rows = bookings(40);
    rows[16].is_read = false;
    rows
}

#[tokio::test(start_paused = true)]
async fn test_selecting_unread_booking_marks_it_read_without_refetch() {
    let backend = Arc::new(FakeBackend::with_rows(forty_with_unread_b17()));
    let mut driver = driver(Arc::clone(&backend), true);

    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    assert_eq!(driver.state().items.len(), 25);
    assert_eq!(driver.state().pagination.total, 40);
    assert_eq!(backend.fetch_count(), 1);

    let b17 = driver.state().items[16].clone();
    assert_eq!(b17.booking_id, "B17");
    assert!(!b17.is_read());

    driver.dispatch(ListEvent::Select(b17));
    driver.settle().await;

    assert_eq!(*backend.mark_reads.lock().unwrap(), vec!["B17".to_string()]);
    assert_eq!(backend.fetch_count(), 1, "the read flag flips locally");
    let state = driver.state();
    assert!(state.items[16].is_read());
    assert!(state.selection.as_ref().is_some_and(|b| b.is_read()));

    tokio::time::advance(POLL).await;
    driver.settle().await;

    assert_eq!(backend.fetch_count(), 2);
    let refetched = backend.last_fetch().unwrap();
    assert_eq!(refetched.page, 0);
    assert!(driver.state().items[16].is_read(), "server copy agrees");
}

#[tokio::test(start_paused = true)]
async fn test_reselecting_the_same_booking_marks_read_once() {
    let backend = Arc::new(FakeBackend::with_rows(forty_with_unread_b17()));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    let b17 = driver.state().items[16].clone();
    driver.dispatch(ListEvent::Select(b17.clone()));
    driver.dispatch(ListEvent::Select(b17));
    driver.settle().await;

    assert_eq!(backend.mark_reads.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_from_page_one_fetches_once_for_page_zero() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(40)));
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::SetPage { index: 1, size: 25 });
    driver.settle().await;
    assert_eq!(driver.state().pagination.current, 1);
    assert_eq!(backend.fetch_count(), 2);

    driver.dispatch(ListEvent::SetFilter(BookingFilter::NewBookings));
    driver.settle().await;

    assert_eq!(backend.fetch_count(), 3, "exactly one fetch for the new filter");
    let query = backend.last_fetch().unwrap();
    assert_eq!(query.filter, BookingFilter::NewBookings);
    assert_eq!(query.page, 0);
    assert_eq!(driver.state().pagination.current, 0);
}

#[tokio::test(start_paused = true)]
async fn test_manual_refresh_with_auto_refresh_off_fetches_once_and_never_polls() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(10)));
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    assert!(driver.timer_running());

    driver.dispatch(ListEvent::SetAutoRefresh(false));
    driver.settle().await;
    assert!(!driver.timer_running());
    assert_eq!(backend.fetch_count(), 1);

    driver.dispatch(ListEvent::Refresh);
    driver.settle().await;
    assert_eq!(backend.fetch_count(), 2);

    for _ in 0..3 {
        tokio::time::advance(POLL).await;
        driver.settle().await;
    }
    assert_eq!(backend.fetch_count(), 2, "no timer fires while auto-refresh is off");

    driver.dispatch(ListEvent::SetAutoRefresh(true));
    driver.settle().await;
    assert_eq!(backend.fetch_count(), 3);
    tokio::time::advance(POLL).await;
    driver.settle().await;
    assert_eq!(backend.fetch_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_coordinate_changes_leave_a_single_timer() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(100)));
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    for index in 1..=3 {
        driver.dispatch(ListEvent::SetPage { index, size: 25 });
        tokio::time::advance(Duration::from_secs(3)).await;
        driver.settle().await;
    }
    driver.dispatch(ListEvent::SetFilter(BookingFilter::Approved));
    driver.settle().await;
    let before = backend.fetch_count();
    assert_eq!(before, 5);

    tokio::time::advance(POLL).await;
    driver.settle().await;

    assert_eq!(backend.fetch_count(), before + 1);
    let query = backend.last_fetch().unwrap();
    assert_eq!(query.filter, BookingFilter::Approved);
    assert_eq!(query.page, 0);
}

#[tokio::test(start_paused = true)]
async fn test_late_response_for_old_page_is_discarded() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(80)));
    backend
        .slow_pages
        .lock()
        .unwrap()
        .insert(1, Duration::from_secs(5));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::SetPage { index: 1, size: 25 });
    driver.dispatch(ListEvent::SetPage { index: 2, size: 25 });
    driver.settle().await;
    assert_eq!(driver.state().items[0].booking_id, "B51");

    tokio::time::sleep(Duration::from_secs(6)).await;
    driver.settle().await;

    let state = driver.state();
    assert_eq!(state.pagination.current, 2);
    assert_eq!(state.items[0].booking_id, "B51", "page 1 arrived late and was dropped");
    assert!(!state.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_mark_complete_refetches_with_new_status() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(5)));
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::RequestStatusChange {
        kind: ActionKind::MarkComplete,
        entity_id: "B2".to_string(),
    });
    driver.settle().await;
    assert!(driver.state().confirm.is_some());
    assert!(backend.actions.lock().unwrap().is_empty(), "nothing sent before confirming");

    driver.dispatch(ListEvent::Confirm);
    driver.settle().await;

    assert_eq!(
        *backend.actions.lock().unwrap(),
        vec![ActionRequest::MarkComplete {
            booking_id: "B2".to_string()
        }]
    );
    let state = driver.state();
    assert!(state.confirm.is_none());
    let toast = state.toast.as_ref().unwrap();
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Marked as Completed successfully!");
    assert_eq!(state.items[1].booking_status, BookingStatus::Completed);
    assert_eq!(backend.fetch_count(), 2);
    assert!(state.pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_rejected_mark_complete_shows_server_message_and_keeps_status() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(5)));
    *backend.fail_next_action.lock().unwrap() = Some("Booking already cancelled".to_string());
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::RequestStatusChange {
        kind: ActionKind::MarkComplete,
        entity_id: "B1".to_string(),
    });
    driver.dispatch(ListEvent::Confirm);
    driver.settle().await;

    let state = driver.state();
    assert!(state.confirm.is_none());
    let toast = state.toast.as_ref().unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Booking already cancelled");
    assert_eq!(state.items[0].booking_status, BookingStatus::New);
    assert_eq!(backend.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_declined_confirmation_sends_nothing() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(3)));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::RequestStatusChange {
        kind: ActionKind::MarkCancel,
        entity_id: "B3".to_string(),
    });
    driver.dispatch(ListEvent::CancelDialog);
    driver.settle().await;

    assert!(driver.state().confirm.is_none());
    assert!(backend.actions.lock().unwrap().is_empty());
    assert_eq!(backend.row("B3").unwrap().booking_status, BookingStatus::New);
}

#[tokio::test(start_paused = true)]
async fn test_assign_requires_a_staff_member() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(3)));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    assert_eq!(driver.state().staff.len(), 2, "roster loads on mount");

    driver.dispatch(ListEvent::OpenAssign {
        entity_id: "B1".to_string(),
    });
    driver.dispatch(ListEvent::SubmitAssign { staff_id: None });
    driver.settle().await;

    let state = driver.state();
    assert_eq!(state.toast.as_ref().unwrap().message, STAFF_REQUIRED);
    assert!(state.assign.is_some());
    assert!(backend.actions.lock().unwrap().is_empty());

    driver.dispatch(ListEvent::SubmitAssign {
        staff_id: Some("S2".to_string()),
    });
    driver.settle().await;

    let state = driver.state();
    assert!(state.assign.is_none());
    assert_eq!(state.items[0].booking_status, BookingStatus::Assigned);
}

#[tokio::test(start_paused = true)]
async fn test_approve_marks_only_that_booking_pending() {
    let mut rows = bookings(2);
    rows[0].booking_status = BookingStatus::Assigned;
    rows[0].booking_invitations = vec![invitation("S1", "ACCEPTED"), invitation("S2", "ACCEPTED")];
    let backend = Arc::new(FakeBackend::with_rows(rows));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;

    driver.dispatch(ListEvent::Approve {
        booking_id: "B1".to_string(),
        staff_id: "S1".to_string(),
    });
    // Second approval on the same booking while the first is in flight
    driver.dispatch(ListEvent::Approve {
        booking_id: "B1".to_string(),
        staff_id: "S2".to_string(),
    });
    assert_eq!(driver.state().pending.len(), 1);
    driver.settle().await;

    assert_eq!(backend.actions.lock().unwrap().len(), 1);
    assert_eq!(
        backend.row("B1").unwrap().booking_status,
        BookingStatus::Approved
    );
    assert!(driver.state().pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_signs_out_and_stops_polling() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(3)));
    let mut driver = driver(Arc::clone(&backend), true);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    assert!(driver.timer_running());

    backend.unauthorized.store(true, Ordering::SeqCst);
    driver.dispatch(ListEvent::Refresh);
    driver.settle().await;

    let state = driver.state();
    assert!(state.signed_out);
    assert!(!driver.timer_running());
    assert_eq!(state.toast.as_ref().unwrap().level, ToastLevel::Error);

    let fetches = backend.fetch_count();
    tokio::time::advance(POLL * 2).await;
    driver.dispatch(ListEvent::Refresh);
    driver.settle().await;
    assert_eq!(backend.fetch_count(), fetches);
}

#[tokio::test(start_paused = true)]
async fn test_run_returns_after_unmount() {
    let backend = Arc::new(FakeBackend::with_rows(bookings(3)));
    let driver = driver(Arc::clone(&backend), true);
    let mut handle = driver.handle();
    let worker = tokio::spawn(driver.run());

    let state = handle.changed().await.unwrap();
    assert!(state.is_mounted());

    assert!(handle.send(ListEvent::Unmount));
    let final_state = worker.await.unwrap();
    assert!(!final_state.is_mounted());
    assert!(!final_state.signed_out);

    tokio::time::advance(POLL * 2).await;
    tokio::task::yield_now().await;
    assert!(backend.fetch_count() <= 1, "no polling after unmount");
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_when_session_is_rejected() {
    let backend = Arc::new(FakeBackend::with_rows(vec![booking(
        "B1",
        BookingStatus::New,
        true,
    )]));
    backend.unauthorized.store(true, Ordering::SeqCst);
    let driver = driver(Arc::clone(&backend), true);

    let final_state = driver.run().await;
    assert!(final_state.signed_out);
    assert!(final_state.items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_refetching_same_coordinates_yields_same_page() {
    let backend = Arc::new(FakeBackend::with_rows(forty_with_unread_b17()));
    let mut driver = driver(Arc::clone(&backend), false);
    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    driver.dispatch(ListEvent::SetPage { index: 1, size: 25 });
    driver.settle().await;

    driver.dispatch(ListEvent::Refresh);
    driver.settle().await;
    let first = driver.state().items.clone();
    let first_total = driver.state().pagination.total;

    driver.dispatch(ListEvent::Refresh);
    driver.settle().await;

    assert_eq!(backend.fetch_count(), 4);
    assert_eq!(first.len(), 15);
    assert_eq!(driver.state().items, first);
    assert_eq!(driver.state().pagination.total, first_total);
}

/// Customers list: no filter, no read flag, no actions
struct FakeCustomers {
    rows: Vec<command_centre::model::Customer>,
    fetches: std::sync::Mutex<Vec<command_centre::model::PageQuery<()>>>,
}

impl command_centre::api::ListBackend<command_centre::model::Customer> for FakeCustomers {
    async fn fetch_page(
        &self,
        query: &command_centre::model::PageQuery<()>,
    ) -> command_centre::error::Result<command_centre::model::Page<command_centre::model::Customer>>
    {
        self.fetches.lock().unwrap().push(query.clone());
        let start = (query.page * query.page_size) as usize;
        let items = self
            .rows
            .iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();
        Ok(command_centre::model::Page::new(items, self.rows.len() as u64))
    }
}

#[tokio::test(start_paused = true)]
async fn test_customers_list_pages_and_selects_without_mark_read() {
    use command_centre::controller::{ListDriver, ListOptions};
    use command_centre::model::Customer;

    let rows = (1..=12)
        .map(|i| Customer {
            customer_id: format!("C{i}"),
            ..Customer::default()
        })
        .collect();
    let backend = Arc::new(FakeCustomers {
        rows,
        fetches: std::sync::Mutex::new(Vec::new()),
    });
    let mut driver = ListDriver::new(
        Arc::clone(&backend),
        ListOptions {
            filter: (),
            page_size: 10,
            auto_refresh: false,
            poll_interval: POLL,
        },
    );

    driver.dispatch(ListEvent::Mount);
    driver.settle().await;
    assert_eq!(driver.state().items.len(), 10);
    assert!(driver.state().pagination.has_next());

    driver.dispatch(ListEvent::SetPage { index: 1, size: 10 });
    driver.settle().await;
    assert_eq!(driver.state().items.len(), 2);
    assert_eq!(driver.state().items[0].id(), "C11");

    let c12 = driver.state().items[1].clone();
    driver.dispatch(ListEvent::Select(c12));
    driver.settle().await;
    assert_eq!(
        driver.state().selection.as_ref().map(|c| c.id().to_string()),
        Some("C12".to_string())
    );
    assert_eq!(backend.fetches.lock().unwrap().len(), 2);
    assert!(!driver.timer_running());
}
