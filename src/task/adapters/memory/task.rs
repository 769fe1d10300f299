//! In-memory task store for orchestration tests and local flows.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Store operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStoreOperation {
    /// [`TaskStore::create_task`].
    Create,
    /// [`TaskStore::update_task`].
    Update,
    /// [`TaskStore::delete_task`].
    Delete,
}

/// Thread-safe in-memory task store.
///
/// Failures can be injected per operation to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    failures: HashMap<TaskStoreOperation, String>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `operation` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when lock acquisition fails.
    pub fn fail(
        &self,
        operation: TaskStoreOperation,
        reason: impl Into<String>,
    ) -> TaskStoreResult<()> {
        self.write()?.failures.insert(operation, reason.into());
        Ok(())
    }

    /// Removes all scripted failures.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when lock acquisition fails.
    pub fn clear_failures(&self) -> TaskStoreResult<()> {
        self.write()?.failures.clear();
        Ok(())
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when lock acquisition fails.
    pub fn len(&self) -> TaskStoreResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns whether the store holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when lock acquisition fails.
    pub fn is_empty(&self) -> TaskStoreResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Returns the scripted failure for `operation`, if any.
fn scripted_failure(
    state: &InMemoryTaskState,
    operation: TaskStoreOperation,
) -> TaskStoreResult<()> {
    state.failures.get(&operation).map_or(Ok(()), |reason| {
        Err(TaskStoreError::persistence(std::io::Error::other(
            reason.clone(),
        )))
    })
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        scripted_failure(&state, TaskStoreOperation::Create)?;

        let task = Task::from_draft(TaskId::new(), draft.clone(), Utc::now());
        state.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        scripted_failure(&state, TaskStoreOperation::Update)?;

        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::NotFound(task.id()));
        }

        let mut stored = task.clone();
        stored.mark_updated(Utc::now());
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        scripted_failure(&state, TaskStoreOperation::Delete)?;

        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }
}
