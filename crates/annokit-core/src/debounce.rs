//! Trailing-edge debouncing for burst-prone work
//!
//! Recalculating every shape on each calibration keystroke would thrash;
//! callers schedule the work here and only the last request within the
//! delay window actually runs.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer backed by the tokio runtime
///
/// Each `call` cancels the previously scheduled one, so a burst of calls
/// collapses into a single execution after the delay. Must be used from
/// within a tokio runtime context.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given trailing delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `f` to run after the delay, replacing any pending call
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
    }

    /// Cancel the pending call, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// The configured trailing delay
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.lock().is_some())
            .finish()
    }
}
