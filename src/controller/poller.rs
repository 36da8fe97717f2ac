//! The auto-refresh timer.
//!
//! One screen owns one [`PollTimer`]. Its single handle cell is aborted before
//! every restart, so there is never more than one timer task alive.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::ListEvent;
use crate::model::Entity;

#[derive(Debug, Default)]
pub struct PollTimer {
    handle: Option<JoinHandle<()>>,
}

impl PollTimer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Replace any running timer with one that sends `Tick { epoch }` every `period`.
    ///
    /// The first tick fires one full period from now.
    pub fn restart<E: Entity>(
        &mut self,
        tx: UnboundedSender<ListEvent<E>>,
        epoch: u64,
        period: Duration,
    ) {
        self.stop();
        tracing::debug!(epoch, period_secs = period.as_secs(), "starting poll timer");
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(ListEvent::Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
