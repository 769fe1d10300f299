//! Service layer composing task writes with location trigger attachment.

use super::naming::{TriggerNameSources, trigger_display_name};
use super::saga::{CompensationLog, RollbackFailure};
use crate::location::{
    domain::{
        Coordinate, GeofenceSpec, LocationSample, LocationTrigger, LocationValidationError,
        TriggerKind, TriggerTemplate,
    },
    ports::TriggerStore,
    services::{GeofenceTriggerError, GeofenceTriggerManager},
};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskTitle},
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Location and naming inputs for a trigger confirmed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationTriggerRequest {
    coordinate: Coordinate,
    radius_meters: f64,
    trigger_kind: TriggerKind,
    label: Option<String>,
    resolved_address: Option<String>,
    search_query: Option<String>,
}

impl LocationTriggerRequest {
    /// Creates a request for a geofence centred on `coordinate`.
    #[must_use]
    pub const fn new(
        coordinate: Coordinate,
        radius_meters: f64,
        trigger_kind: TriggerKind,
    ) -> Self {
        Self {
            coordinate,
            radius_meters,
            trigger_kind,
            label: None,
            resolved_address: None,
            search_query: None,
        }
    }

    /// Creates a request from a sample produced by search or the current
    /// location flow, carrying over its resolved address.
    #[must_use]
    pub fn from_sample(
        sample: &LocationSample,
        radius_meters: f64,
        trigger_kind: TriggerKind,
    ) -> Self {
        Self {
            resolved_address: sample.resolved_address().map(str::to_owned),
            ..Self::new(*sample.coordinate(), radius_meters, trigger_kind)
        }
    }

    /// Sets an explicit label for the geofence.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the address resolved for the coordinate.
    #[must_use]
    pub fn with_resolved_address(mut self, address: impl Into<String>) -> Self {
        self.resolved_address = Some(address.into());
        self
    }

    /// Sets the free text the user searched for.
    #[must_use]
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Returns the geofence centre.
    #[must_use]
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Returns the geofence radius in metres.
    #[must_use]
    pub const fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Returns which transitions fire the trigger.
    #[must_use]
    pub const fn trigger_kind(&self) -> TriggerKind {
        self.trigger_kind
    }

    /// Checks the radius, then the coordinate.
    ///
    /// # Errors
    ///
    /// Returns the first [`LocationValidationError`] found.
    pub const fn validate(&self) -> Result<(), LocationValidationError> {
        if let Some(err) = crate::location::validation::radius_validation_error(self.radius_meters)
        {
            return Err(err);
        }
        match crate::location::validation::coordinate_validation_error(Some(&self.coordinate)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns the geofence name for a trigger owned by a task titled
    /// `task_title`.
    #[must_use]
    pub fn display_name(&self, task_title: Option<&TaskTitle>) -> String {
        trigger_display_name(TriggerNameSources {
            label: self.label.as_deref(),
            resolved_address: self.resolved_address.as_deref(),
            search_query: self.search_query.as_deref(),
            task_title,
        })
    }

    fn into_template(self, task_title: &TaskTitle, clock: &impl Clock) -> TriggerTemplate {
        let name = self.display_name(Some(task_title));
        let geofence = GeofenceSpec::new(
            name,
            self.coordinate,
            self.radius_meters,
            self.trigger_kind,
            clock,
        );
        TriggerTemplate::new(geofence, clock)
    }
}

/// A persisted task together with the trigger attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWithTrigger {
    /// The task as returned by the task store.
    pub task: Task,
    /// The trigger bound to the task.
    pub trigger: LocationTrigger,
}

/// Errors returned by [`TaskLocationOrchestrator`].
#[derive(Debug, Clone, Error)]
pub enum TaskLocationError {
    /// The requested geofence is invalid. Nothing was written.
    #[error(transparent)]
    Validation(#[from] LocationValidationError),

    /// The task store rejected the task write. No trigger was written.
    #[error(transparent)]
    Task(#[from] TaskStoreError),

    /// The trigger step failed after the task write.
    #[error("failed to attach location trigger: {source}")]
    Trigger {
        /// The trigger failure.
        source: GeofenceTriggerError,
        /// Compensations that failed while undoing the task write.
        rollback: Option<RollbackFailure>,
    },
}

impl TaskLocationError {
    const fn trigger(source: GeofenceTriggerError) -> Self {
        Self::Trigger {
            source,
            rollback: None,
        }
    }

    /// Returns the rollback failure reported alongside a trigger error.
    #[must_use]
    pub const fn rollback_failure(&self) -> Option<&RollbackFailure> {
        match self {
            Self::Trigger {
                rollback: Some(failure),
                ..
            } => Some(failure),
            _ => None,
        }
    }
}

/// Result type for orchestration operations.
pub type TaskLocationResult<T> = Result<T, TaskLocationError>;

/// Writes a task and its location trigger as a best-effort saga.
///
/// The task store and trigger store share no transaction. When the trigger
/// write fails after a new task was created, the task is deleted again.
pub struct TaskLocationOrchestrator<T, S, C>
where
    T: TaskStore + 'static,
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    triggers: GeofenceTriggerManager<S>,
    clock: Arc<C>,
}

impl<T, S, C> TaskLocationOrchestrator<T, S, C>
where
    T: TaskStore + 'static,
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator over the task store and trigger manager.
    #[must_use]
    pub const fn new(tasks: Arc<T>, triggers: GeofenceTriggerManager<S>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            triggers,
            clock,
        }
    }

    /// Returns the trigger manager used for the trigger step.
    #[must_use]
    pub const fn triggers(&self) -> &GeofenceTriggerManager<S> {
        &self.triggers
    }

    /// Creates a task and attaches a location trigger to it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLocationError::Validation`] before any write when the
    /// geofence is invalid, [`TaskLocationError::Task`] when the task cannot
    /// be created, or [`TaskLocationError::Trigger`] when the trigger cannot
    /// be attached. In the last case the new task has been deleted, or the
    /// error carries the [`RollbackFailure`] that prevented it.
    pub async fn create_task_with_trigger(
        &self,
        draft: &TaskDraft,
        request: LocationTriggerRequest,
    ) -> TaskLocationResult<TaskWithTrigger> {
        request.validate()?;
        let template = request.into_template(draft.title(), &*self.clock);

        let task = self.tasks.create_task(draft).await?;
        let task_id = task.id();
        let mut compensations = CompensationLog::new();
        let tasks = Arc::clone(&self.tasks);
        compensations.register("delete created task", move || async move {
            tasks.delete_task(task_id).await
        });

        let trigger = template.finalize(task_id);
        match self.triggers.add_trigger(&trigger).await {
            Ok(trigger_id) => {
                compensations.commit();
                info!(%task_id, %trigger_id, "task created with location trigger");
                Ok(TaskWithTrigger { task, trigger })
            }
            Err(source) => {
                warn!(%task_id, error = %source, "trigger attachment failed, rolling back task");
                let rollback = compensations.rollback().await.err();
                Err(TaskLocationError::Trigger { source, rollback })
            }
        }
    }

    /// Saves edits to an existing task and attaches a location trigger.
    ///
    /// The task already existed before the edit, so a failed trigger step is
    /// not compensated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLocationError::Validation`] before any write when the
    /// geofence is invalid, [`TaskLocationError::Task`] when the update
    /// fails, or [`TaskLocationError::Trigger`] when the trigger cannot be
    /// attached.
    pub async fn update_task_with_trigger(
        &self,
        task: &Task,
        request: LocationTriggerRequest,
    ) -> TaskLocationResult<TaskWithTrigger> {
        request.validate()?;
        let template = request.into_template(task.title(), &*self.clock);

        let updated = self.tasks.update_task(task).await?;
        let trigger = template.finalize(updated.id());
        let trigger_id = self
            .triggers
            .add_trigger(&trigger)
            .await
            .map_err(TaskLocationError::trigger)?;

        info!(task_id = %updated.id(), %trigger_id, "task updated with location trigger");
        Ok(TaskWithTrigger {
            task: updated,
            trigger,
        })
    }

    /// Removes a task's triggers, then the task itself. Returns the number
    /// of triggers removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLocationError::Trigger`] when a trigger cannot be
    /// removed, leaving the task in place, or [`TaskLocationError::Task`]
    /// when the task delete fails.
    pub async fn delete_task_with_triggers(&self, task_id: TaskId) -> TaskLocationResult<usize> {
        let removed = self
            .triggers
            .remove_triggers_for_task(task_id)
            .await
            .map_err(TaskLocationError::trigger)?;
        self.tasks.delete_task(task_id).await?;
        info!(%task_id, removed, "task deleted with its location triggers");
        Ok(removed)
    }
}
