//! In-memory trigger store for tests and local flows.

use crate::location::{
    domain::{LocationTrigger, TriggerId},
    ports::{TriggerStore, TriggerStoreError, TriggerStoreResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Store operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerStoreOperation {
    /// [`TriggerStore::insert`].
    Insert,
    /// [`TriggerStore::update`].
    Update,
    /// [`TriggerStore::remove`].
    Remove,
}

/// Thread-safe in-memory trigger store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTriggerStore {
    state: Arc<RwLock<InMemoryTriggerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTriggerState {
    triggers: HashMap<TriggerId, LocationTrigger>,
    task_index: HashMap<TaskId, Vec<TriggerId>>,
    failures: HashMap<TriggerStoreOperation, String>,
}

impl InMemoryTriggerStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `operation` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Persistence`] when lock acquisition fails.
    pub fn fail(
        &self,
        operation: TriggerStoreOperation,
        reason: impl Into<String>,
    ) -> TriggerStoreResult<()> {
        self.write()?.failures.insert(operation, reason.into());
        Ok(())
    }

    /// Removes all scripted failures.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Persistence`] when lock acquisition fails.
    pub fn clear_failures(&self) -> TriggerStoreResult<()> {
        self.write()?.failures.clear();
        Ok(())
    }

    /// Returns the number of stored triggers.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Persistence`] when lock acquisition fails.
    pub fn len(&self) -> TriggerStoreResult<usize> {
        Ok(self.read()?.triggers.len())
    }

    /// Returns whether the store holds no triggers.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Persistence`] when lock acquisition fails.
    pub fn is_empty(&self) -> TriggerStoreResult<bool> {
        Ok(self.read()?.triggers.is_empty())
    }

    fn read(&self) -> TriggerStoreResult<RwLockReadGuard<'_, InMemoryTriggerState>> {
        self.state.read().map_err(|err| {
            TriggerStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TriggerStoreResult<RwLockWriteGuard<'_, InMemoryTriggerState>> {
        self.state.write().map_err(|err| {
            TriggerStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn scripted_failure(
    state: &InMemoryTriggerState,
    operation: TriggerStoreOperation,
) -> TriggerStoreResult<()> {
    state.failures.get(&operation).map_or(Ok(()), |reason| {
        Err(TriggerStoreError::persistence(std::io::Error::other(
            reason.clone(),
        )))
    })
}

/// Removes a trigger ID from the task index, cleaning up the entry if empty.
fn unindex(state: &mut InMemoryTriggerState, task_id: TaskId, trigger_id: TriggerId) {
    if let Some(ids) = state.task_index.get_mut(&task_id) {
        ids.retain(|id| *id != trigger_id);
        if ids.is_empty() {
            state.task_index.remove(&task_id);
        }
    }
}

#[async_trait]
impl TriggerStore for InMemoryTriggerStore {
    async fn insert(&self, trigger: &LocationTrigger) -> TriggerStoreResult<()> {
        let mut state = self.write()?;
        scripted_failure(&state, TriggerStoreOperation::Insert)?;

        if state.triggers.contains_key(&trigger.id()) {
            return Err(TriggerStoreError::DuplicateTrigger(trigger.id()));
        }

        state
            .task_index
            .entry(trigger.task_id())
            .or_default()
            .push(trigger.id());
        state.triggers.insert(trigger.id(), trigger.clone());
        Ok(())
    }

    async fn update(&self, trigger: &LocationTrigger) -> TriggerStoreResult<()> {
        let mut state = self.write()?;
        scripted_failure(&state, TriggerStoreOperation::Update)?;

        let previous_task = state
            .triggers
            .get(&trigger.id())
            .ok_or(TriggerStoreError::NotFound(trigger.id()))?
            .task_id();

        if previous_task != trigger.task_id() {
            unindex(&mut state, previous_task, trigger.id());
            state
                .task_index
                .entry(trigger.task_id())
                .or_default()
                .push(trigger.id());
        }

        state.triggers.insert(trigger.id(), trigger.clone());
        Ok(())
    }

    async fn remove(&self, id: TriggerId) -> TriggerStoreResult<()> {
        let mut state = self.write()?;
        scripted_failure(&state, TriggerStoreOperation::Remove)?;

        let removed = state
            .triggers
            .remove(&id)
            .ok_or(TriggerStoreError::NotFound(id))?;
        unindex(&mut state, removed.task_id(), id);
        Ok(())
    }

    async fn find_by_id(&self, id: TriggerId) -> TriggerStoreResult<Option<LocationTrigger>> {
        Ok(self.read()?.triggers.get(&id).cloned())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TriggerStoreResult<Vec<LocationTrigger>> {
        let state = self.read()?;
        Ok(state
            .task_index
            .get(&task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.triggers.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
