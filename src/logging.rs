//! Tracing subscriber setup.
//!
//! Plain commands log to stderr. The interactive screen owns the terminal,
//! so it logs to `<root>/command-centre.log` instead.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::paths::log_path;

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "COMMAND_CENTRE_LOG";

/// Where log lines should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(target: LogTarget) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File => {
            let path = log_path();
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
                // No writable log file: stay silent rather than draw over the screen
                Err(_) => builder.with_writer(std::io::sink).try_init(),
            }
        }
    };

    // Err only means a subscriber is already installed
    let _ = installed;
}
