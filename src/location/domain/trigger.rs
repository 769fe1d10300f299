//! Location triggers binding a geofence to a task.

use super::{GeofenceSpec, TriggerId};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A trigger that has not been attached to a task yet.
///
/// Templates exist only while a task is being created or edited. They cannot
/// be handed to a trigger store; [`TriggerTemplate::finalize`] binds them to
/// the task the store assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerTemplate {
    id: TriggerId,
    geofence: GeofenceSpec,
    enabled: bool,
    created_at: DateTime<Utc>,
}

impl TriggerTemplate {
    /// Creates an enabled template for `geofence`.
    #[must_use]
    pub fn new(geofence: GeofenceSpec, clock: &impl Clock) -> Self {
        Self {
            id: TriggerId::new(),
            geofence,
            enabled: true,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the finalized trigger will carry.
    #[must_use]
    pub const fn id(&self) -> TriggerId {
        self.id
    }

    /// Returns the template geofence.
    #[must_use]
    pub const fn geofence(&self) -> &GeofenceSpec {
        &self.geofence
    }

    /// Binds the template to its owning task.
    #[must_use]
    pub fn finalize(self, task_id: TaskId) -> LocationTrigger {
        LocationTrigger {
            id: self.id,
            task_id,
            geofence: self.geofence,
            enabled: self.enabled,
            created_at: self.created_at,
        }
    }
}

/// A geofence attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTrigger {
    id: TriggerId,
    task_id: TaskId,
    geofence: GeofenceSpec,
    enabled: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTriggerData {
    /// Persisted trigger identifier.
    pub id: TriggerId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted geofence.
    pub geofence: GeofenceSpec,
    /// Persisted enabled flag.
    pub enabled: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LocationTrigger {
    /// Reconstructs a trigger from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTriggerData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            geofence: data.geofence,
            enabled: data.enabled,
            created_at: data.created_at,
        }
    }

    /// Returns the trigger identifier.
    #[must_use]
    pub const fn id(&self) -> TriggerId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the geofence.
    #[must_use]
    pub const fn geofence(&self) -> &GeofenceSpec {
        &self.geofence
    }

    /// Returns whether the trigger fires.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the enabled flag and returns the new value.
    pub const fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Replaces the editable geofence fields, keeping its identity.
    pub fn replace_geofence(&mut self, edit: GeofenceSpec) {
        self.geofence = self.geofence.edited_with(edit);
    }
}
