//! Runs a [`ListState`] against a [`ListBackend`] on the tokio runtime.
//!
//! All state mutation happens on the driver's own loop, one event at a time.
//! Requests run as spawned tasks and report back through the event channel,
//! so completions interleave with user input but never run concurrently with
//! the reducer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::timeout;

use super::{Effect, ListEvent, ListState, PollTimer};
use crate::api::ListBackend;
use crate::model::Entity;

/// How long `settle` waits for another event before deciding things are quiet
const SETTLE_WINDOW: Duration = Duration::from_millis(1);

/// Initial settings for a list screen
#[derive(Debug, Clone)]
pub struct ListOptions<F> {
    pub filter: F,
    pub page_size: u32,
    pub auto_refresh: bool,
    pub poll_interval: Duration,
}

impl<F: Default> Default for ListOptions<F> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            page_size: 25,
            auto_refresh: true,
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// Cloneable front door to a running driver
#[derive(Debug)]
pub struct ListHandle<E: Entity> {
    tx: mpsc::UnboundedSender<ListEvent<E>>,
    state: watch::Receiver<ListState<E>>,
}

impl<E: Entity> Clone for ListHandle<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: Entity> ListHandle<E> {
    /// Queue an event. Returns false once the driver has stopped.
    pub fn send(&self, event: ListEvent<E>) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Latest published state
    pub fn snapshot(&self) -> ListState<E> {
        self.state.borrow().clone()
    }

    /// Wait for the next published state. `None` once the driver has stopped.
    pub async fn changed(&mut self) -> Option<ListState<E>> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }
}

pub struct ListDriver<E: Entity, B: ListBackend<E>> {
    state: ListState<E>,
    backend: Arc<B>,
    tx: mpsc::UnboundedSender<ListEvent<E>>,
    rx: mpsc::UnboundedReceiver<ListEvent<E>>,
    timer: PollTimer,
    poll_interval: Duration,
    published: watch::Sender<ListState<E>>,
}

impl<E: Entity, B: ListBackend<E>> ListDriver<E, B> {
    pub fn new(backend: Arc<B>, options: ListOptions<E::Filter>) -> Self {
        let state = ListState::new(options.filter, options.page_size, options.auto_refresh);
        let (tx, rx) = mpsc::unbounded_channel();
        let (published, _) = watch::channel(state.clone());
        Self {
            state,
            backend,
            tx,
            rx,
            timer: PollTimer::new(),
            poll_interval: options.poll_interval,
            published,
        }
    }

    pub fn handle(&self) -> ListHandle<E> {
        ListHandle {
            tx: self.tx.clone(),
            state: self.published.subscribe(),
        }
    }

    pub fn state(&self) -> &ListState<E> {
        &self.state
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Apply one event and start whatever I/O it asks for
    pub fn dispatch(&mut self, event: ListEvent<E>) {
        let effects = self.state.apply(event);
        for effect in effects {
            self.execute(effect);
        }
        self.published.send_replace(self.state.clone());
    }

    fn execute(&mut self, effect: Effect<E::Filter>) {
        match effect {
            Effect::Fetch(request) => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.fetch_page(&request.query).await;
                    let _ = tx.send(ListEvent::FetchCompleted { request, result });
                });
            }
            Effect::StartPolling { epoch } => {
                self.timer.restart(self.tx.clone(), epoch, self.poll_interval);
            }
            Effect::StopPolling => self.timer.stop(),
            Effect::MarkRead(id) => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.mark_read(&id).await;
                    let _ = tx.send(ListEvent::MarkReadCompleted { id, result });
                });
            }
            Effect::Perform(request) => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.perform(&request).await;
                    let _ = tx.send(ListEvent::ActionCompleted { request, result });
                });
            }
            Effect::LoadStaff => {
                let backend = Arc::clone(&self.backend);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = backend.list_staff().await;
                    let _ = tx.send(ListEvent::StaffLoaded(result));
                });
            }
        }
    }

    /// Process queued events until none arrive for a moment
    pub async fn settle(&mut self) {
        while let Ok(Some(event)) = timeout(SETTLE_WINDOW, self.rx.recv()).await {
            self.dispatch(event);
        }
    }

    /// Mount, then process events until unmounted or signed out
    pub async fn run(mut self) -> ListState<E> {
        self.dispatch(ListEvent::Mount);
        while let Some(event) = self.rx.recv().await {
            let unmount = matches!(event, ListEvent::Unmount);
            self.dispatch(event);
            if unmount || self.state.signed_out {
                break;
            }
        }
        self.timer.stop();
        self.state
    }
}
