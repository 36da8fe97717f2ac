//! Toast bar rendering

use iocraft::prelude::*;

use crate::controller::Toast;
use crate::tui::theme::theme;

/// Render a toast bar, or nothing when there is no toast
pub fn render_toast(toast: &Option<Toast>) -> Option<AnyElement<'static>> {
    toast.as_ref().map(|t| {
        let color = theme().toast_color(t.level);
        element! {
            View(
                width: 100pct,
                height: 3,
                flex_shrink: 0.0,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                background_color: Color::Black,
                border_edges: Edges::Top,
                border_style: BorderStyle::Single,
                border_color: color,
            ) {
                Text(content: t.message.clone(), color: color)
            }
        }
        .into_any()
    })
}
