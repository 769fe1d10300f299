//! Compensating actions for multi-store writes without a shared transaction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

type UndoFuture = Pin<Box<dyn Future<Output = Result<(), CompensationError>> + Send>>;
type UndoAction = Box<dyn FnOnce() -> UndoFuture + Send>;

/// A compensating action that itself failed.
#[derive(Debug, Clone, Error)]
#[error("compensation '{step}' failed: {source}")]
pub struct CompensationError {
    step: &'static str,
    source: Arc<dyn std::error::Error + Send + Sync>,
}

impl CompensationError {
    /// Returns the label of the failed compensation.
    #[must_use]
    pub const fn step(&self) -> &'static str {
        self.step
    }
}

/// Every compensation that failed during a rollback, in execution order.
#[derive(Debug, Clone, Error)]
#[error("{} compensating action(s) failed during rollback", .failures.len())]
pub struct RollbackFailure {
    failures: Vec<CompensationError>,
}

impl RollbackFailure {
    /// Returns the failed compensations.
    #[must_use]
    pub fn failures(&self) -> &[CompensationError] {
        &self.failures
    }
}

/// Undo steps registered by completed saga steps.
///
/// On failure, [`Self::rollback`] runs the registered steps newest first.
/// On success, [`Self::commit`] discards them.
#[derive(Default)]
pub struct CompensationLog {
    steps: Vec<(&'static str, UndoAction)>,
}

impl CompensationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the undo step for a step that just completed.
    pub fn register<F, Fut, E>(&mut self, step: &'static str, undo: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let action: UndoAction = Box::new(move || {
            Box::pin(async move {
                undo().await.map_err(|err| CompensationError {
                    step,
                    source: Arc::new(err),
                })
            })
        });
        self.steps.push((step, action));
    }

    /// Returns the number of registered undo steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether no undo step is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Discards the registered undo steps.
    pub fn commit(self) {
        debug!(steps = self.steps.len(), "saga committed");
    }

    /// Runs every registered undo step, newest first.
    ///
    /// A failing step does not stop the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns [`RollbackFailure`] listing each step that failed.
    pub async fn rollback(self) -> Result<(), RollbackFailure> {
        let mut failures = Vec::new();
        for (step, undo) in self.steps.into_iter().rev() {
            match undo().await {
                Ok(()) => debug!(step, "compensation applied"),
                Err(err) => {
                    warn!(step, error = %err, "compensation failed");
                    failures.push(err);
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RollbackFailure { failures })
        }
    }
}
