//! Scrollable bookings table
//!
//! Unread rows carry a `●` marker; the row shown in the detail panel is
//! marked with `>`.

use iocraft::prelude::*;

use crate::model::{Booking, Entity, or_dash};
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct BookingListProps {
    pub bookings: Vec<Booking>,
    /// Highlighted row
    pub cursor: usize,
    /// Booking open in the detail panel
    pub selected_id: Option<String>,
    /// Rows that fit in the pane
    pub visible_height: usize,
    pub loading: bool,
    /// "Page x of y" line under the rows
    pub page_label: String,
    pub has_focus: bool,
}

/// First row to draw so that `cursor` stays visible
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor;
    }
    cursor.saturating_sub(visible - 1)
}

#[component]
pub fn BookingList(props: &BookingListProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let border_color = if props.has_focus {
        theme.border_focused
    } else {
        theme.border
    };

    if props.bookings.is_empty() {
        let message = if props.loading {
            "Loading bookings…"
        } else {
            "No bookings found"
        };
        return element! {
            View(
                width: 100pct,
                height: 100pct,
                border_style: BorderStyle::Round,
                border_color: border_color,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            ) {
                Text(content: message, color: theme.text_dimmed)
            }
        };
    }

    let start = scroll_offset(props.cursor, props.visible_height);
    let end = (start + props.visible_height).min(props.bookings.len());
    let rows: Vec<(usize, Booking)> = props.bookings[start..end]
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, b)| (start + i, b))
        .collect();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: border_color,
        ) {
            View(height: 1, flex_direction: FlexDirection::Row, padding_left: 1) {
                View(width: 4, flex_shrink: 0.0) { Text(content: "") }
                View(width: 12, flex_shrink: 0.0) {
                    Text(content: "Booking ID", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 22, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                    Text(content: "Customer", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(width: 24, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                    Text(content: "Slot", color: theme.text_dimmed, weight: Weight::Bold)
                }
                View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                    Text(content: "Status", color: theme.text_dimmed, weight: Weight::Bold)
                }
            }

            #(rows.into_iter().map(|(index, booking)| {
                let is_cursor = index == props.cursor;
                let is_open = props.selected_id.as_deref() == Some(booking.id());
                element! {
                    BookingRow(booking, is_cursor, is_open)
                }
            }))

            View(flex_grow: 1.0)

            View(height: 1, padding_left: 1) {
                Text(content: props.page_label.clone(), color: theme.text_dimmed)
            }
        }
    }
}

#[derive(Default, Props)]
pub struct BookingRowProps {
    pub booking: Booking,
    pub is_cursor: bool,
    pub is_open: bool,
}

#[component]
pub fn BookingRow(props: &BookingRowProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let b = &props.booking;

    let bg_color = props.is_cursor.then_some(theme.highlight);
    let text_color = if props.is_cursor {
        theme.highlight_text
    } else {
        theme.text
    };
    let marker = format!(
        "{}{}",
        if props.is_open { ">" } else { " " },
        if b.is_read() { " " } else { "●" }
    );

    element! {
        View(
            height: 1,
            width: 100pct,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
            background_color: bg_color,
        ) {
            View(width: 4, flex_shrink: 0.0) {
                Text(content: marker, color: if props.is_cursor { text_color } else { theme.unread })
            }
            View(width: 12, flex_shrink: 0.0) {
                Text(
                    content: b.booking_id.clone(),
                    color: if props.is_cursor { text_color } else { theme.id_color },
                )
            }
            View(width: 22, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: or_dash(Some(&b.customer_name)), color: text_color)
            }
            View(width: 24, flex_shrink: 0.0, overflow: Overflow::Hidden) {
                Text(content: b.slot_display(), color: text_color)
            }
            View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                Text(
                    content: b.status_display(),
                    color: if props.is_cursor { text_color } else { theme.status_color(&b.booking_status) },
                )
            }
        }
    }
}
