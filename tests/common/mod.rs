#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Command, Output};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use command_centre::api::ListBackend;
use command_centre::controller::{ActionRequest, ListDriver, ListOptions};
use command_centre::error::{CentreError, Result};
use command_centre::model::{
    Booking, BookingFilter, BookingStatus, Invitation, Page, PageQuery, StaffMember,
};
use tempfile::TempDir;

pub const POLL: Duration = Duration::from_secs(10);

/// Runs the binary against an isolated config root
pub struct CentreTest {
    pub temp_dir: TempDir,
}

impl CentreTest {
    pub fn new() -> Self {
        CentreTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_command-centre"))
            .args(args)
            .env("COMMAND_CENTRE_ROOT", self.temp_dir.path())
            .env_remove("COMMAND_CENTRE_API_URL")
            .env_remove("COMMAND_CENTRE_TOKEN")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute command-centre")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "command {:?} should have failed: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.temp_dir.path().join("config.yaml"), yaml)
            .expect("Failed to write config");
    }

    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.temp_dir.path().join("config.yaml")).unwrap_or_default()
    }
}

pub fn booking(id: &str, status: BookingStatus, is_read: bool) -> Booking {
    Booking {
        booking_id: id.to_string(),
        customer_name: format!("Customer {id}"),
        booking_status: status,
        is_read,
        ..Booking::default()
    }
}

/// `B1..=Bn`, all new and read
pub fn bookings(n: usize) -> Vec<Booking> {
    (1..=n)
        .map(|i| booking(&format!("B{i}"), BookingStatus::New, true))
        .collect()
}

/// In-memory bookings server
///
/// Keeps its own rows so that mutations are visible to the next fetch, and
/// records every call made against it.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: Mutex<Vec<Booking>>,
    pub staff: Vec<StaffMember>,
    pub fetches: Mutex<Vec<PageQuery<BookingFilter>>>,
    pub mark_reads: Mutex<Vec<String>>,
    pub actions: Mutex<Vec<ActionRequest>>,
    /// Latency for the next fetch of a page index
    pub slow_pages: Mutex<HashMap<u32, Duration>>,
    /// Server message returned by the next action
    pub fail_next_action: Mutex<Option<String>>,
    /// Answer everything with 401
    pub unauthorized: AtomicBool,
}

impl FakeBackend {
    pub fn with_rows(rows: Vec<Booking>) -> Self {
        FakeBackend {
            rows: Mutex::new(rows),
            staff: vec![
                StaffMember {
                    staff_id: "S1".to_string(),
                    employee_name: "Ravi".to_string(),
                    ..StaffMember::default()
                },
                StaffMember {
                    staff_id: "S2".to_string(),
                    employee_name: "Meena".to_string(),
                    ..StaffMember::default()
                },
            ],
            ..FakeBackend::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn last_fetch(&self) -> Option<PageQuery<BookingFilter>> {
        self.fetches.lock().unwrap().last().cloned()
    }

    pub fn row(&self, id: &str) -> Option<Booking> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.booking_id == id)
            .cloned()
    }

    fn check_session(&self) -> Result<()> {
        if self.unauthorized.load(Ordering::SeqCst) {
            Err(CentreError::Unauthorized)
        } else {
            Ok(())
        }
    }

    fn update<F: FnOnce(&mut Booking)>(&self, id: &str, f: F) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|b| b.booking_id == id)
            .ok_or_else(|| CentreError::NotFound(id.to_string()))?;
        f(row);
        Ok(())
    }
}

impl ListBackend<Booking> for FakeBackend {
    async fn fetch_page(&self, query: &PageQuery<BookingFilter>) -> Result<Page<Booking>> {
        self.fetches.lock().unwrap().push(query.clone());
        let delay = self.slow_pages.lock().unwrap().remove(&query.page);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_session()?;

        let rows = self.rows.lock().unwrap();
        let matching: Vec<Booking> = rows
            .iter()
            .filter(|b| match query.filter {
                BookingFilter::All => true,
                BookingFilter::NewBookings => b.booking_status == BookingStatus::New,
                BookingFilter::Approved => b.booking_status == BookingStatus::Approved,
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let start = (query.page * query.page_size) as usize;
        let items = matching
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .collect();
        Ok(Page::new(items, total))
    }

    async fn mark_read(&self, id: &str) -> Result<()> {
        self.check_session()?;
        self.mark_reads.lock().unwrap().push(id.to_string());
        self.update(id, |b| b.is_read = true)
    }

    async fn perform(&self, request: &ActionRequest) -> Result<()> {
        self.check_session()?;
        self.actions.lock().unwrap().push(request.clone());
        if let Some(message) = self.fail_next_action.lock().unwrap().take() {
            return Err(CentreError::Rejected(message));
        }
        match request {
            ActionRequest::MarkComplete { booking_id } => {
                self.update(booking_id, |b| b.booking_status = BookingStatus::Completed)
            }
            ActionRequest::MarkCancel { booking_id } => {
                self.update(booking_id, |b| b.booking_status = BookingStatus::Cancelled)
            }
            ActionRequest::AssignStaff { booking_id, .. } => {
                self.update(booking_id, |b| b.booking_status = BookingStatus::Assigned)
            }
            ActionRequest::ApproveInvitation {
                booking_id,
                staff_id,
            } => self.update(booking_id, |b| {
                b.booking_status = BookingStatus::Approved;
                for inv in &mut b.booking_invitations {
                    if &inv.staff_id == staff_id {
                        inv.booking_invitation_status = "APPROVED".to_string();
                    }
                }
            }),
        }
    }

    async fn list_staff(&self) -> Result<Vec<StaffMember>> {
        self.check_session()?;
        Ok(self.staff.clone())
    }
}

pub fn invitation(staff_id: &str, status: &str) -> Invitation {
    Invitation {
        staff_id: staff_id.to_string(),
        staff_name: format!("Staff {staff_id}"),
        booking_invitation_status: status.to_string(),
        ..Invitation::default()
    }
}

pub fn driver(
    backend: std::sync::Arc<FakeBackend>,
    auto_refresh: bool,
) -> ListDriver<Booking, FakeBackend> {
    ListDriver::new(
        backend,
        ListOptions {
            filter: BookingFilter::All,
            page_size: 25,
            auto_refresh,
            poll_interval: POLL,
        },
    )
}
