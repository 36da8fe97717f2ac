//! Transient user feedback produced by the list controller

use std::time::{Duration, Instant};

/// How long a toast stays on screen before the view drops it
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Error toasts linger longer so the server message can be read
pub const ERROR_TOAST_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Success,
}

impl Toast {
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    pub fn ttl(&self) -> Duration {
        match self.level {
            ToastLevel::Error => ERROR_TOAST_TTL,
            ToastLevel::Success => TOAST_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) >= self.ttl()
    }
}
