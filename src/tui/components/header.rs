//! App header bar component

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct HeaderProps {
    /// Screen name shown after the app title
    pub subtitle: String,
    /// Active filter label
    pub filter: String,
    pub auto_refresh: bool,
    pub loading: bool,
    /// Total rows reported by the server
    pub total: u64,
}

/// App header bar showing the screen, filter and refresh state
#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let refresh = if props.auto_refresh {
        "auto-refresh on"
    } else {
        "auto-refresh off"
    };
    let right = if props.loading {
        format!("{refresh} · loading…")
    } else {
        format!("{refresh} · {} total", props.total)
    };

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(
                    content: format!("Command Centre - {}", props.subtitle),
                    color: theme.highlight_text,
                    weight: Weight::Bold,
                )
                Text(
                    content: format!("[{}]", props.filter),
                    color: theme.highlight_text,
                )
            }
            Text(content: right, color: theme.highlight_text)
        }
    }
}
