//! Booking detail panel
//!
//! Shows the selected booking and its staff invitations. The highlighted
//! invitation is the one `v` approves.

use iocraft::prelude::*;

use crate::model::{Booking, or_dash};
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct BookingDetailProps {
    pub booking: Option<Booking>,
    /// Highlighted invitation
    pub invitation_cursor: usize,
    /// Labels of the requests in flight for this booking
    pub pending: Vec<String>,
}

fn detail_fields(b: &Booking) -> Vec<(&'static str, String)> {
    let patient = b
        .booking_for_member
        .as_ref()
        .map(|m| {
            let name = or_dash(Some(&m.full_name()));
            if m.relation.is_empty() {
                name
            } else {
                format!("{name} ({})", m.relation)
            }
        })
        .unwrap_or_else(|| "--".to_string());

    vec![
        ("FieldEZ ID", or_dash(Some(&b.field_ez_ticket_number))),
        ("Booked", or_dash(Some(&b.created_at_str))),
        ("Slot", b.slot_display()),
        ("Customer", or_dash(Some(&b.customer_name))),
        ("Email", or_dash(b.customer_email_id.as_deref())),
        ("Patient", patient),
        ("Service", or_dash(Some(&b.service_name))),
        ("Staff", b.assignee_display()),
        ("Amount", b.amount_display()),
    ]
}

#[component]
pub fn BookingDetail(props: &BookingDetailProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let Some(booking) = props.booking.clone() else {
        return element! {
            View(
                width: 100pct,
                height: 100pct,
                border_style: BorderStyle::Round,
                border_color: theme.border,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            ) {
                Text(content: "Press Enter to open a booking", color: theme.text_dimmed)
            }
        };
    };

    let fields = detail_fields(&booking);
    let status_color = theme.status_color(&booking.booking_status);
    let pending = if props.pending.is_empty() {
        None
    } else {
        Some(format!("working: {}", props.pending.join(", ")))
    };
    let invitations: Vec<(bool, bool, String)> = booking
        .booking_invitations
        .iter()
        .enumerate()
        .map(|(i, inv)| {
            (
                i == props.invitation_cursor,
                booking.can_approve(inv),
                format!(
                    "{} · {} · {}",
                    or_dash(Some(&inv.staff_name)),
                    or_dash(Some(&inv.staff_email)),
                    or_dash(Some(&inv.booking_invitation_status)),
                ),
            )
        })
        .collect();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
            flex_direction: FlexDirection::Column,
            padding_left: 1,
            padding_right: 1,
            overflow: Overflow::Hidden,
        ) {
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(content: booking.booking_id.clone(), color: theme.id_color, weight: Weight::Bold)
                Text(content: format!("[{}]", booking.status_display()), color: status_color)
            }
            #(pending.map(|p| element! {
                Text(content: p, color: theme.text_dimmed)
            }))
            View(height: 1)

            #(fields.into_iter().map(|(label, value)| element! {
                View(flex_direction: FlexDirection::Row) {
                    View(width: 12, flex_shrink: 0.0) {
                        Text(content: label, color: theme.text_dimmed)
                    }
                    Text(content: value, color: theme.text)
                }
            }))

            View(height: 1)
            Text(content: "Invitations", color: theme.text, weight: Weight::Bold)
            #(if invitations.is_empty() {
                vec![element! { Text(content: "--", color: theme.text_dimmed) }.into_any()]
            } else {
                invitations.into_iter().map(|(is_cursor, approvable, line)| {
                    let marker = if is_cursor { ">" } else { " " };
                    let suffix = if approvable { "  [v] approve" } else { "" };
                    element! {
                        View(
                            flex_direction: FlexDirection::Row,
                            background_color: is_cursor.then_some(theme.highlight),
                        ) {
                            Text(content: format!("{marker} {line}"), color: theme.text)
                            Text(content: suffix, color: Color::Green)
                        }
                    }
                    .into_any()
                }).collect::<Vec<_>>()
            })
        }
    }
}
