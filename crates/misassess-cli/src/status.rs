//! Transient status line.
//!
//! A message set here disappears on its own after a delay. Each message gets
//! a new generation number, and a scheduled clear only fires if its
//! generation is still current, so a late timer never wipes a newer message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct StatusState {
    generation: u64,
    message: Option<String>,
    pending_clear: Option<JoinHandle<()>>,
}

/// Shared, self-clearing status message.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    inner: Arc<Mutex<StatusState>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StatusState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `message` for `ttl`, replacing any current message.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_transient(&self, message: impl Into<String>, ttl: Duration) {
        let mut state = self.lock();
        state.generation += 1;
        state.message = Some(message.into());
        if let Some(previous) = state.pending_clear.take() {
            previous.abort();
        }

        let generation = state.generation;
        let inner = Arc::clone(&self.inner);
        state.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
            if state.generation == generation {
                state.message = None;
                state.pending_clear = None;
            }
        }));
    }

    /// The message currently shown, if any.
    pub fn current(&self) -> Option<String> {
        self.lock().message.clone()
    }
}
