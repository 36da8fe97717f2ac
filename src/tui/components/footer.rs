//! Keyboard shortcuts bar component

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: String,
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", shortcut.key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", shortcut.action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts for the bookings list
///
/// `status_actions` is false when the targeted booking is already finished.
pub fn list_shortcuts(has_selection: bool, status_actions: bool) -> Vec<Shortcut> {
    let mut shortcuts = vec![
        Shortcut::new("j/k", "Move"),
        Shortcut::new("Enter", "Open"),
        Shortcut::new("n/p", "Page"),
        Shortcut::new("+/-", "Page Size"),
        Shortcut::new("f", "Filter"),
        Shortcut::new("a", "Auto-refresh"),
        Shortcut::new("r", "Refresh"),
    ];
    if status_actions {
        shortcuts.push(Shortcut::new("c", "Complete"));
        shortcuts.push(Shortcut::new("x", "Cancel"));
    }
    shortcuts.push(Shortcut::new("s", "Assign"));
    if has_selection {
        shortcuts.push(Shortcut::new("Tab", "Invitation"));
        shortcuts.push(Shortcut::new("v", "Approve"));
        shortcuts.push(Shortcut::new("Esc", "Close Detail"));
    }
    shortcuts.push(Shortcut::new("q", "Quit"));
    shortcuts
}

/// Shortcuts for the confirm dialog
pub fn confirm_shortcuts() -> Vec<Shortcut> {
    vec![Shortcut::new("y", "Yes"), Shortcut::new("n/Esc", "No")]
}

/// Shortcuts for the assign dialog
pub fn assign_shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new("j/k", "Choose"),
        Shortcut::new("Enter", "Assign"),
        Shortcut::new("Esc", "Cancel"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_shortcuts_only_with_selection() {
        let keys = |s: Vec<Shortcut>| s.into_iter().map(|s| s.key).collect::<Vec<_>>();
        assert!(!keys(list_shortcuts(false, true)).contains(&"v".to_string()));
        assert!(keys(list_shortcuts(true, true)).contains(&"v".to_string()));
        assert_eq!(keys(list_shortcuts(true, true)).last().map(String::as_str), Some("q"));
    }

    #[test]
    fn test_finished_booking_hides_status_shortcuts() {
        let keys = |s: Vec<Shortcut>| s.into_iter().map(|s| s.key).collect::<Vec<_>>();
        let finished = keys(list_shortcuts(true, false));
        assert!(!finished.contains(&"c".to_string()));
        assert!(!finished.contains(&"x".to_string()));
        assert!(finished.contains(&"s".to_string()));
    }
}
