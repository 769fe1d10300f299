//! Single-slot cancellable timer.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds at most one pending delayed callback.
///
/// Scheduling replaces and cancels the previous callback. Dropping the timer
/// cancels whatever is still pending, so no callback outlives its owner.
/// Scheduling requires a Tokio runtime.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl DebounceTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_fire` after `delay` unless cancelled or replaced first.
    pub fn schedule<F>(&self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Cancels the pending callback.
    ///
    /// Returns whether a callback was still waiting to fire.
    pub fn cancel(&self) -> bool {
        self.slot().take().is_some_and(|handle| {
            let pending = !handle.is_finished();
            handle.abort();
            pending
        })
    }

    /// Returns whether a callback is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
