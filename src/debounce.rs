//! Debounced scheduling between input events and store writes.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Collapses a burst of calls into one execution after a quiet window.
///
/// Sits at the boundary between UI input events (sliders, checkboxes,
/// search fields) and the view-state store, so the filter pipeline is not
/// recomputed on every intermediate event. The engines themselves stay
/// synchronous; only this boundary owns a timer. The window length comes
/// from `[ui] debounce_ms` and is a tuning knob, not a correctness
/// requirement.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `action` after the quiet window, cancelling any action
    /// scheduled earlier that has not run yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        if let Some(previous) = self.swap(Some(handle)) {
            previous.abort();
        }
    }

    /// Cancels the pending action, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.swap(None) {
            previous.abort();
        }
    }

    fn swap(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *pending, next)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
