//! Domain model for geofences and location triggers.
//!
//! Coordinates and samples are plain values: they may hold out-of-range data
//! reported by a provider, and are checked with the rules in
//! [`crate::location::validation`] before any of them reaches a store.

mod coordinate;
mod error;
mod geofence;
mod ids;
mod permission;
mod trigger;

pub use coordinate::{Coordinate, LocationSample};
pub use error::{
    LocationValidationError, ParsePermissionStateError, ParseTriggerKindError, PermissionError,
};
pub use geofence::{GeofenceSpec, PersistedGeofenceData, TriggerKind};
pub use ids::{GeofenceId, TriggerId};
pub use permission::PermissionState;
pub use trigger::{LocationTrigger, PersistedTriggerData, TriggerTemplate};
