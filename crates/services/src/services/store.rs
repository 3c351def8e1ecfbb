//! Shared list state observed by screens.

use db::remote::RemoteError;
use tokio::sync::{Mutex, MutexGuard, watch};

/// Snapshot of an entity list together with its request status.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    /// State before the first fetch has completed.
    pub fn initial() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

/// Owns one list's state and serializes the requests that mutate it.
#[derive(Debug)]
pub(crate) struct ListStore<T> {
    state: watch::Sender<ListState<T>>,
    ops: Mutex<()>,
}

impl<T: Clone> ListStore<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ListState::initial());
        Self {
            state,
            ops: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    /// Held for the duration of each fetch/create.
    pub async fn serialize(&self) -> MutexGuard<'_, ()> {
        self.ops.lock().await
    }

    pub fn begin_load(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }

    /// Publish a completed load. Failures keep the previous items.
    pub fn finish_load(&self, result: Result<Vec<T>, RemoteError>, fallback: &str) {
        self.state.send_modify(|s| {
            match result {
                Ok(items) => s.items = items,
                Err(err) => s.error = Some(error_message(&err, fallback)),
            }
            s.is_loading = false;
        });
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }
}

/// Human-readable text for a failed request.
pub fn error_message(err: &RemoteError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
