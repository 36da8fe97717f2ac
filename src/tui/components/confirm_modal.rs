//! Status change confirmation dialog

use iocraft::prelude::*;

use super::ModalOverlay;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ConfirmModalProps {
    pub prompt: String,
    /// The confirmed request is in flight; yes is disabled
    pub loading: bool,
}

#[component]
pub fn ConfirmModal(props: &ConfirmModalProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let hint = if props.loading {
        "Working…"
    } else {
        "[y] Yes   [n] No"
    };

    element! {
        ModalOverlay(show_backdrop: false) {
            View(
                width: 60,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Double,
                border_color: Color::Yellow,
                background_color: Color::Black,
                padding: 1,
                gap: 1,
            ) {
                Text(content: "Confirm", color: Color::Yellow, weight: Weight::Bold)
                Text(content: props.prompt.clone(), color: theme.text)
                Text(content: hint, color: theme.text_dimmed)
            }
        }
    }
}
