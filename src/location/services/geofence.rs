//! Service layer for geofence trigger CRUD.

use crate::location::{
    domain::{GeofenceSpec, LocationTrigger, LocationValidationError, TriggerId},
    ports::{TriggerStore, TriggerStoreError},
};
use crate::task::domain::TaskId;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for trigger operations.
#[derive(Debug, Clone, Error)]
pub enum GeofenceTriggerError {
    /// The geofence radius or coordinate is invalid.
    #[error(transparent)]
    Validation(#[from] LocationValidationError),
    /// The trigger store rejected the operation.
    #[error(transparent)]
    Store(#[from] TriggerStoreError),
    /// No trigger exists with the given identifier.
    #[error("location trigger {0} not found")]
    NotFound(TriggerId),
}

/// Result type for trigger service operations.
pub type GeofenceTriggerResult<T> = Result<T, GeofenceTriggerError>;

/// Owns every mutation of the persisted trigger collection.
///
/// Geofences are validated before any store call.
pub struct GeofenceTriggerManager<S>
where
    S: TriggerStore,
{
    store: Arc<S>,
}

impl<S> Clone for GeofenceTriggerManager<S>
where
    S: TriggerStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> GeofenceTriggerManager<S>
where
    S: TriggerStore,
{
    /// Creates a manager over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn find_trigger_or_error(
        &self,
        id: TriggerId,
    ) -> GeofenceTriggerResult<LocationTrigger> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(GeofenceTriggerError::NotFound(id))
    }

    /// Validates and persists a trigger.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceTriggerError::Validation`] for an invalid radius,
    /// coordinate or blank name, without touching the store, or
    /// [`GeofenceTriggerError::Store`] when persistence fails.
    pub async fn add_trigger(
        &self,
        trigger: &LocationTrigger,
    ) -> GeofenceTriggerResult<TriggerId> {
        trigger.geofence().validate()?;
        self.store.insert(trigger).await?;
        info!(
            trigger_id = %trigger.id(),
            task_id = %trigger.task_id(),
            kind = %trigger.geofence().trigger_kind(),
            "location trigger added"
        );
        Ok(trigger.id())
    }

    /// Flips a trigger between enabled and disabled.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceTriggerError::NotFound`] when the trigger is
    /// unknown, or store errors.
    pub async fn toggle_enabled(&self, id: TriggerId) -> GeofenceTriggerResult<()> {
        let mut trigger = self.find_trigger_or_error(id).await?;
        let enabled = trigger.toggle_enabled();
        self.store.update(&trigger).await?;
        debug!(trigger_id = %id, enabled, "location trigger toggled");
        Ok(())
    }

    /// Replaces the name, centre, radius, kind, and active flag of a
    /// trigger's geofence. The geofence keeps its identity and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceTriggerError::Validation`] before any lookup when
    /// the new geofence is invalid, [`GeofenceTriggerError::NotFound`] when
    /// the trigger is unknown, or store errors.
    pub async fn update_geofence(
        &self,
        id: TriggerId,
        geofence: GeofenceSpec,
    ) -> GeofenceTriggerResult<()> {
        geofence.validate()?;
        let mut trigger = self.find_trigger_or_error(id).await?;
        trigger.replace_geofence(geofence);
        self.store.update(&trigger).await?;
        debug!(trigger_id = %id, "location trigger geofence updated");
        Ok(())
    }

    /// Deletes a trigger. Removing an absent trigger succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceTriggerError::Store`] for persistence failures other
    /// than the trigger being absent.
    pub async fn remove_trigger(&self, id: TriggerId) -> GeofenceTriggerResult<()> {
        match self.store.remove(id).await {
            Ok(()) => {
                info!(trigger_id = %id, "location trigger removed");
                Ok(())
            }
            Err(TriggerStoreError::NotFound(_)) => {
                debug!(trigger_id = %id, "location trigger already absent");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Finds a trigger by identifier.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn find_trigger(
        &self,
        id: TriggerId,
    ) -> GeofenceTriggerResult<Option<LocationTrigger>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Lists the triggers attached to a task.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn triggers_for_task(
        &self,
        task_id: TaskId,
    ) -> GeofenceTriggerResult<Vec<LocationTrigger>> {
        Ok(self.store.list_for_task(task_id).await?)
    }

    /// Removes every trigger attached to a task and returns how many there
    /// were.
    ///
    /// # Errors
    ///
    /// Returns the first store error; triggers removed before it stay
    /// removed.
    pub async fn remove_triggers_for_task(
        &self,
        task_id: TaskId,
    ) -> GeofenceTriggerResult<usize> {
        let triggers = self.store.list_for_task(task_id).await?;
        for trigger in &triggers {
            self.remove_trigger(trigger.id()).await?;
        }
        Ok(triggers.len())
    }
}
