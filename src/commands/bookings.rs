//! `bookings` subcommands

use std::sync::Arc;

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::interactive::confirm;
use super::{
    authenticated_client, colored_status, page_footer, print_json, resolve_page_size,
};
use crate::api::{ApiClient, BookingsBackend};
use crate::config::Config;
use crate::controller::{
    ActionKind, ActionRequest, ListDriver, ListEvent, ListOptions, confirmation_prompt,
};
use crate::error::{CentreError, FETCH_FALLBACK, Result};
use crate::model::{Booking, BookingFilter, Entity, PageQuery, or_dash};

/// A row in the bookings list table
#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "")]
    unread: String,
    #[tabled(rename = "Booking ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "Staff Member")]
    staff: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        BookingRow {
            unread: if b.is_read() { String::new() } else { "●".to_string() },
            id: b.booking_id.clone(),
            customer: or_dash(Some(&b.customer_name)),
            service: or_dash(Some(&b.service_name)),
            slot: b.slot_display(),
            staff: b.assignee_display(),
            amount: b.amount_display(),
            status: colored_status(&b.booking_status, &b.status_display()),
        }
    }
}

#[derive(Tabled)]
struct InvitationRow {
    #[tabled(rename = "Staff ID")]
    staff_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Approvable")]
    approvable: String,
}

pub struct BookingsLsOptions {
    pub filter: BookingFilter,
    pub page: u32,
    pub page_size: Option<u32>,
    pub json: bool,
}

/// List one page of bookings
pub async fn cmd_bookings_ls(options: BookingsLsOptions) -> Result<()> {
    let config = Config::load()?;
    let page_size = resolve_page_size(options.page_size, &config)?;
    let client = ApiClient::from_config(&config)?;

    let query = PageQuery {
        filter: options.filter,
        page: options.page,
        page_size,
    };
    let page = client
        .list_bookings(&query)
        .await
        .map_err(|e| surface(e, FETCH_FALLBACK))?
        .bounded(page_size);

    if options.json {
        return print_json(&json!({
            "filter": options.filter.as_param(),
            "page": options.page,
            "page_size": page_size,
            "total": page.total,
            "bookings": page.items,
        }));
    }

    if page.items.is_empty() {
        println!("No bookings found ({}).", options.filter.label());
        return Ok(());
    }

    let rows: Vec<BookingRow> = page.items.iter().map(BookingRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "\n{} · {}",
        options.filter.label().cyan(),
        page_footer(page.items.len(), options.page, page_size, page.total)
    );
    Ok(())
}

/// Show one booking in full
pub async fn cmd_bookings_show(id: &str, json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let booking = client
        .get_booking(id)
        .await
        .map_err(|e| surface(e, FETCH_FALLBACK))?;

    if json {
        return print_json(&booking);
    }

    print_booking(&booking);
    Ok(())
}

fn print_booking(b: &Booking) {
    let field = |label: &str, value: String| println!("{:>18}: {}", label.cyan(), value);

    println!("{}\n", "Booking Detail".bold());
    field("Booking ID", b.booking_id.clone());
    field("FieldEZ ID", or_dash(Some(&b.field_ez_ticket_number)));
    field("Booking Date", or_dash(Some(&b.created_at_str)));
    field("Slot", b.slot_display());
    field(
        "Customer",
        match &b.customer_email_id {
            Some(email) if !email.is_empty() => format!("{} ({email})", or_dash(Some(&b.customer_name))),
            _ => or_dash(Some(&b.customer_name)),
        },
    );
    field(
        "Patient",
        b.booking_for_member
            .as_ref()
            .map(|m| {
                let name = m.full_name();
                if m.relation.is_empty() {
                    or_dash(Some(&name))
                } else {
                    format!("{} ({})", or_dash(Some(&name)), m.relation)
                }
            })
            .unwrap_or_else(|| "--".to_string()),
    );
    field("Service", or_dash(Some(&b.service_name)));
    field(
        "Status",
        colored_status(&b.booking_status, &b.status_display()),
    );
    field("Staff Member", b.assignee_display());
    field("Amount", b.amount_display());
    if let Some(payment) = &b.payment {
        field("Payment Status", or_dash(Some(&payment.payment_status)));
        field("Payment Channel", or_dash(Some(&payment.payment_channel)));
        field("Transaction ID", or_dash(Some(&payment.transaction_id)));
    }
    if let (Some(sent), Some(accepted)) = (b.total_invitations_sent, b.total_invitations_accepted) {
        field("Invitations", format!("{accepted} accepted of {sent} sent"));
    }

    if b.booking_invitations.is_empty() {
        field("Invitations", "--".to_string());
        return;
    }

    let rows: Vec<InvitationRow> = b
        .booking_invitations
        .iter()
        .map(|inv| InvitationRow {
            staff_id: inv.staff_id.clone(),
            name: or_dash(Some(&inv.staff_name)),
            email: or_dash(Some(&inv.staff_email)),
            phone: or_dash(Some(&inv.staff_mobile_number)),
            status: inv.booking_invitation_status.clone(),
            approvable: if b.can_approve(inv) {
                "yes".green().to_string()
            } else {
                "--".to_string()
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{table}");
}

/// Mark a booking completed or cancelled, asking first unless `yes`
pub async fn cmd_bookings_status(kind: ActionKind, id: &str, yes: bool, json: bool) -> Result<()> {
    let request = ActionRequest::status_change(kind, id).ok_or_else(|| {
        CentreError::InvalidInput(format!("{kind} is not a status change"))
    })?;
    let client = authenticated_client()?;

    if !yes && !confirm(&confirmation_prompt(kind, id))? {
        if json {
            print_json(&json!({ "id": id, "action": kind, "performed": false }))?;
        } else {
            println!("Aborted");
        }
        return Ok(());
    }

    run_action(&client, request, json).await
}

/// Assign a booking to a staff member
pub async fn cmd_bookings_assign(id: &str, staff_id: &str, json: bool) -> Result<()> {
    if staff_id.trim().is_empty() {
        return Err(CentreError::InvalidInput(
            crate::controller::STAFF_REQUIRED.to_string(),
        ));
    }
    let client = authenticated_client()?;
    let request = ActionRequest::AssignStaff {
        booking_id: id.to_string(),
        staff_id: staff_id.to_string(),
    };
    run_action(&client, request, json).await
}

/// Approve a staff member's accepted invitation
pub async fn cmd_bookings_approve(id: &str, staff_id: &str, json: bool) -> Result<()> {
    let client = authenticated_client()?;
    let booking = client
        .get_booking(id)
        .await
        .map_err(|e| surface(e, FETCH_FALLBACK))?;

    let invitation = booking
        .booking_invitations
        .iter()
        .find(|inv| inv.staff_id == staff_id)
        .ok_or_else(|| {
            CentreError::InvalidInput(format!("booking {id} has no invitation for staff {staff_id}"))
        })?;
    if !booking.can_approve(invitation) {
        return Err(CentreError::InvalidInput(format!(
            "invitation for staff {staff_id} cannot be approved (invitation {}, booking {})",
            invitation.booking_invitation_status, booking.booking_status
        )));
    }

    let request = ActionRequest::ApproveInvitation {
        booking_id: id.to_string(),
        staff_id: staff_id.to_string(),
    };
    run_action(&client, request, json).await
}

/// Mark a booking as read
pub async fn cmd_bookings_mark_read(id: &str, json: bool) -> Result<()> {
    let client = authenticated_client()?;
    client
        .mark_booking_read(id)
        .await
        .map_err(|e| surface(e, crate::error::UPDATE_FALLBACK))?;
    if json {
        print_json(&json!({ "id": id, "read": true }))
    } else {
        println!("{} {} marked as read", "✓".green(), id.cyan());
        Ok(())
    }
}

async fn run_action(client: &ApiClient, request: ActionRequest, json: bool) -> Result<()> {
    let kind = request.kind();
    let id = request.entity_id().to_string();
    client
        .perform_booking_action(&request)
        .await
        .map_err(|e| surface(e, kind.failure_fallback()))?;

    tracing::info!(id = %id, %kind, "action succeeded");
    if json {
        print_json(&json!({
            "id": id,
            "action": kind,
            "performed": true,
            "message": kind.success_message(),
        }))
    } else {
        println!("{} {}", "✓".green(), kind.success_message());
        Ok(())
    }
}

/// Turn a request failure into what the operator should read.
///
/// Session and configuration problems keep their own message. A server
/// rejection carries the server's text; anything else gets the call site's
/// fallback without claiming the server turned it down.
pub(crate) fn surface(error: CentreError, fallback: &str) -> CentreError {
    match error {
        CentreError::Unauthorized
        | CentreError::NotLoggedIn
        | CentreError::Config(_)
        | CentreError::NotFound(_) => error,
        CentreError::Rejected(_) => {
            let message = error.user_message(fallback);
            CentreError::Rejected(message)
        }
        other => {
            tracing::error!(error = %other, "request failed");
            if other.is_transport() {
                CentreError::Transport(fallback.to_string())
            } else {
                CentreError::Other(fallback.to_string())
            }
        }
    }
}

/// Interactive bookings screen
pub async fn cmd_bookings_browse(filter: BookingFilter, no_auto_refresh: bool) -> Result<()> {
    use crate::tui::BookingsScreen;
    use iocraft::prelude::*;

    let config = Config::load()?;
    let client = ApiClient::from_config(&config)?;
    let backend = Arc::new(BookingsBackend::new(client));

    let driver = ListDriver::new(
        backend,
        ListOptions {
            filter,
            page_size: config.page_size,
            auto_refresh: config.auto_refresh && !no_auto_refresh,
            poll_interval: config.poll_interval(),
        },
    );
    let handle = driver.handle();
    let worker = tokio::spawn(driver.run());

    let screen = element!(BookingsScreen(handle: Some(handle.clone())))
        .fullscreen()
        .await;
    // No-op if the screen already unmounted or the session was rejected
    handle.send(ListEvent::Unmount);
    screen.map_err(|e| CentreError::Other(format!("TUI error: {e}")))?;

    let final_state = worker
        .await
        .map_err(|e| CentreError::Other(format!("list driver stopped unexpectedly: {e}")))?;
    if final_state.signed_out {
        return Err(CentreError::Unauthorized);
    }
    Ok(())
}
