//! Colors shared by the interactive screens
//!
//! Status colors match the ones `commands::colored_status` prints.

use iocraft::prelude::Color;

use crate::controller::ToastLevel;
use crate::model::BookingStatus;

const GREY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

#[derive(Debug, Clone)]
pub struct Theme {
    pub status_new: Color,
    pub status_approved: Color,
    pub status_assigned: Color,
    pub status_completed: Color,
    pub status_cancelled: Color,
    pub status_other: Color,

    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub highlight_text: Color,
    pub id_color: Color,
    pub unread: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_new: Color::Yellow,
            status_approved: Color::Cyan,
            status_assigned: Color::Blue,
            status_completed: Color::Green,
            status_cancelled: GREY,
            status_other: Color::White,

            border: GREY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GREY,
            highlight: Color::Blue,
            highlight_text: Color::White,
            id_color: Color::Cyan,
            unread: Color::Magenta,
        }
    }
}

impl Theme {
    pub fn status_color(&self, status: &BookingStatus) -> Color {
        match status {
            BookingStatus::New => self.status_new,
            BookingStatus::Approved => self.status_approved,
            BookingStatus::Assigned => self.status_assigned,
            BookingStatus::Completed => self.status_completed,
            BookingStatus::Cancelled => self.status_cancelled,
            BookingStatus::Other(_) => self.status_other,
        }
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Error => Color::Red,
            ToastLevel::Success => Color::Green,
        }
    }
}

pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

pub fn theme() -> &'static Theme {
    &THEME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_uses_fallback_color() {
        let theme = theme();
        assert_eq!(
            theme.status_color(&BookingStatus::Other("ON_HOLD".to_string())),
            theme.status_other
        );
        assert_eq!(
            theme.status_color(&BookingStatus::Completed),
            theme.status_completed
        );
    }
}
