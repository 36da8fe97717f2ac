//! Staff picker for assigning a booking

use iocraft::prelude::*;

use super::ModalOverlay;
use crate::model::StaffMember;
use crate::tui::theme::theme;

/// Roster rows drawn at most
const MAX_ROWS: usize = 12;

#[derive(Default, Props)]
pub struct AssignModalProps {
    pub booking_id: String,
    pub staff: Vec<StaffMember>,
    pub cursor: usize,
    pub loading: bool,
}

#[component]
pub fn AssignModal(props: &AssignModalProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let start = props.cursor.saturating_sub(MAX_ROWS - 1);
    let rows: Vec<(bool, String)> = props
        .staff
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_ROWS)
        .map(|(i, s)| (i == props.cursor, s.label()))
        .collect();
    let hint = if props.loading {
        "Assigning…"
    } else {
        "[Enter] Assign   [Esc] Cancel"
    };

    element! {
        ModalOverlay(show_backdrop: false) {
            View(
                width: 64,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Double,
                border_color: theme.border_focused,
                background_color: Color::Black,
                padding: 1,
            ) {
                Text(
                    content: format!("Assign booking {} to", props.booking_id),
                    color: Color::Cyan,
                    weight: Weight::Bold,
                )
                View(height: 1)
                #(if rows.is_empty() {
                    vec![element! {
                        Text(content: "No staff members loaded", color: theme.text_dimmed)
                    }.into_any()]
                } else {
                    rows.into_iter().map(|(is_cursor, label)| {
                        element! {
                            View(background_color: is_cursor.then_some(theme.highlight)) {
                                Text(
                                    content: format!("{} {label}", if is_cursor { ">" } else { " " }),
                                    color: theme.text,
                                )
                            }
                        }.into_any()
                    }).collect::<Vec<_>>()
                })
                View(height: 1)
                Text(content: hint, color: theme.text_dimmed)
            }
        }
    }
}
