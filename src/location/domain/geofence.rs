//! Geofence regions and the events they report.

use super::{Coordinate, GeofenceId, LocationValidationError, ParseTriggerKindError};
use crate::location::validation::{coordinate_validation_error, radius_validation_error};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary crossings a geofence reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Fires when the device enters the region.
    Enter,
    /// Fires when the device leaves the region.
    Exit,
    /// Fires on both entry and exit.
    Both,
}

impl TriggerKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Both => "both",
        }
    }

    /// Returns the user-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enter => "When arriving",
            Self::Exit => "When leaving",
            Self::Both => "When arriving or leaving",
        }
    }

    /// Returns whether entering the region fires the trigger.
    #[must_use]
    pub const fn notifies_on_enter(self) -> bool {
        match self {
            Self::Enter | Self::Both => true,
            Self::Exit => false,
        }
    }

    /// Returns whether leaving the region fires the trigger.
    #[must_use]
    pub const fn notifies_on_exit(self) -> bool {
        match self {
            Self::Exit | Self::Both => true,
            Self::Enter => false,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TriggerKind {
    type Error = ParseTriggerKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "enter" => Ok(Self::Enter),
            "exit" => Ok(Self::Exit),
            "both" => Ok(Self::Both),
            _ => Err(ParseTriggerKindError(value.to_owned())),
        }
    }
}

impl FromStr for TriggerKind {
    type Err = ParseTriggerKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// A named circular region.
///
/// Radius and coordinate are validated by [`GeofenceSpec::validate`] rather
/// than at construction, so persisted or provider-built values can be
/// inspected and rejected with a specific reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSpec {
    id: GeofenceId,
    name: String,
    coordinate: Coordinate,
    radius_meters: f64,
    trigger_kind: TriggerKind,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted geofence.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedGeofenceData {
    /// Persisted geofence identifier.
    pub id: GeofenceId,
    /// Persisted display name.
    pub name: String,
    /// Persisted centre.
    pub coordinate: Coordinate,
    /// Persisted radius in metres.
    pub radius_meters: f64,
    /// Persisted trigger kind.
    pub trigger_kind: TriggerKind,
    /// Persisted active flag.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl GeofenceSpec {
    /// Creates an active geofence.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        radius_meters: f64,
        trigger_kind: TriggerKind,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: GeofenceId::new(),
            name: name.into().trim().to_owned(),
            coordinate,
            radius_meters,
            trigger_kind,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a geofence from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGeofenceData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            coordinate: data.coordinate,
            radius_meters: data.radius_meters,
            trigger_kind: data.trigger_kind,
            active: data.active,
            created_at: data.created_at,
        }
    }

    /// Checks the radius, then the coordinate, then the name.
    ///
    /// # Errors
    ///
    /// Returns the first [`LocationValidationError`] found.
    pub fn validate(&self) -> Result<(), LocationValidationError> {
        if let Some(err) = radius_validation_error(self.radius_meters) {
            return Err(err);
        }
        if let Some(err) = coordinate_validation_error(Some(&self.coordinate)) {
            return Err(err);
        }
        if self.name.trim().is_empty() {
            return Err(LocationValidationError::MissingName);
        }
        Ok(())
    }

    /// Returns the geofence identifier.
    #[must_use]
    pub const fn id(&self) -> GeofenceId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the centre of the region.
    #[must_use]
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Returns the radius in metres.
    #[must_use]
    pub const fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Returns the boundary crossings reported.
    #[must_use]
    pub const fn trigger_kind(&self) -> TriggerKind {
        self.trigger_kind
    }

    /// Returns whether the region is monitored.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy that keeps this geofence's identity and creation time
    /// but takes every editable field from `edit`.
    #[must_use]
    pub(crate) fn edited_with(&self, edit: Self) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            ..edit
        }
    }
}
