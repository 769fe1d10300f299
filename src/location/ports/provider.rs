//! Device location provider port: position, permission, and geocoding.

use crate::location::domain::{Coordinate, LocationSample, PermissionState};
use async_trait::async_trait;
use thiserror::Error;

/// On-device location services.
///
/// Every call may suspend: permission requests wait for the user to answer a
/// native prompt, and geocoding performs network I/O.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Acquires the current device position.
    ///
    /// # Errors
    ///
    /// Returns [`LocationProviderError`] when no fix can be obtained.
    async fn get_current_position(&self) -> Result<LocationSample, LocationProviderError>;

    /// Resolves a coordinate to a human-readable address.
    ///
    /// Returns `Ok(None)` when the coordinate has no known address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] when the lookup fails.
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodingError>;

    /// Resolves free-text input to a location.
    ///
    /// Returns `Ok(None)` when nothing matches the text.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError`] when the lookup fails.
    async fn forward_geocode(&self, text: &str) -> Result<Option<LocationSample>, GeocodingError>;

    /// Reports the current permission state without prompting the user.
    async fn check_permission(&self) -> PermissionState;

    /// Shows the native permission prompt and reports the outcome.
    async fn request_permission(&self) -> PermissionState;

    /// Reports whether device location services are switched on.
    async fn is_service_enabled(&self) -> bool;
}

/// Classified geocoding failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeocodingError {
    /// No location matches the input.
    #[error("address not found")]
    AddressNotFound,

    /// The geocoding service could not be reached.
    #[error("network unavailable")]
    NetworkUnavailable,

    /// The lookup did not complete in time.
    #[error("geocoding timed out")]
    Timeout,

    /// Any other failure.
    #[error("geocoding failed: {0}")]
    Unknown(String),
}

/// Failures acquiring the device position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationProviderError {
    /// No fix was obtained within the allowed time.
    #[error("timed out waiting for a location fix")]
    Timeout,

    /// The provider refused access.
    #[error("location access denied by the provider")]
    PermissionDenied,

    /// Location services are switched off.
    #[error("location services are disabled")]
    ServiceDisabled,

    /// Any other provider failure.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}
