//! Error types for location domain validation and parsing.

use thiserror::Error;

/// Locally detected validation failures.
///
/// These never require I/O and are always reported before any side effect.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum LocationValidationError {
    /// No coordinate was supplied.
    #[error("a location is required")]
    Missing,

    /// The latitude is non-finite or outside `[-90, 90]`.
    #[error("invalid latitude {0}, expected a finite value between -90 and 90")]
    InvalidLatitude(f64),

    /// The longitude is non-finite or outside `[-180, 180]`.
    #[error("invalid longitude {0}, expected a finite value between -180 and 180")]
    InvalidLongitude(f64),

    /// The geofence radius is non-finite or outside `[1, 10000]` metres.
    #[error("invalid radius {0} m, expected a finite value between 1 and 10000 metres")]
    InvalidRadius(f64),

    /// The geofence name is blank.
    #[error("a geofence name is required")]
    MissingName,
}

/// Reasons the device denies access to location data.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// The user has not granted access, or has declined the last prompt.
    #[error("location permission denied")]
    Denied,

    /// The user has permanently declined access; only system settings can
    /// restore it.
    #[error("location permission permanently denied, enable it in system settings")]
    DeniedForever,

    /// Location services are switched off on the device.
    #[error("location services are disabled")]
    ServiceDisabled,
}

/// Error returned while parsing a trigger kind from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown trigger kind: {0}")]
pub struct ParseTriggerKindError(pub String);

/// Error returned while parsing a permission state from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown permission state: {0}")]
pub struct ParsePermissionStateError(pub String);
