//! Store port for persisted location triggers.

use crate::location::domain::{LocationTrigger, TriggerId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for trigger store operations.
pub type TriggerStoreResult<T> = Result<T, TriggerStoreError>;

/// Durable trigger persistence contract.
///
/// Only finalized triggers, already bound to a task, can be stored.
/// Deleting a task's triggers when the task goes away is the store's
/// responsibility once [`TriggerStore::remove`] is invoked for each of them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriggerStore: Send + Sync {
    /// Stores a new trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::DuplicateTrigger`] when the identifier
    /// already exists.
    async fn insert(&self, trigger: &LocationTrigger) -> TriggerStoreResult<()>;

    /// Replaces an existing trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::NotFound`] when the trigger does not exist.
    async fn update(&self, trigger: &LocationTrigger) -> TriggerStoreResult<()>;

    /// Deletes a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::NotFound`] when the trigger does not exist.
    async fn remove(&self, id: TriggerId) -> TriggerStoreResult<()>;

    /// Finds a trigger by identifier.
    async fn find_by_id(&self, id: TriggerId) -> TriggerStoreResult<Option<LocationTrigger>>;

    /// Returns every trigger attached to the task.
    async fn list_for_task(&self, task_id: TaskId) -> TriggerStoreResult<Vec<LocationTrigger>>;
}

/// Errors returned by trigger store implementations.
#[derive(Debug, Clone, Error)]
pub enum TriggerStoreError {
    /// A trigger with the same identifier already exists.
    #[error("duplicate trigger identifier: {0}")]
    DuplicateTrigger(TriggerId),

    /// The trigger was not found.
    #[error("trigger not found: {0}")]
    NotFound(TriggerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TriggerStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
