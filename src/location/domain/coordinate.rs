//! Geographic coordinates and location samples.

use super::LocationValidationError;
use crate::location::validation::coordinate_validation_error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS84 latitude/longitude pair in decimal degrees.
///
/// Construction does not validate; use [`Coordinate::validated`] or the
/// rules in [`crate::location::validation`] before accepting provider data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`LocationValidationError::InvalidLatitude`] or
    /// [`LocationValidationError::InvalidLongitude`].
    pub const fn validated(latitude: f64, longitude: f64) -> Result<Self, LocationValidationError> {
        let coordinate = Self::new(latitude, longitude);
        match coordinate_validation_error(Some(&coordinate)) {
            Some(err) => Err(err),
            None => Ok(coordinate),
        }
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A position reported by the location provider or produced by geocoding.
///
/// Samples are immutable; enrichment returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    coordinate: Coordinate,
    accuracy_meters: Option<f64>,
    captured_at: DateTime<Utc>,
    resolved_address: Option<String>,
}

impl LocationSample {
    /// Creates a sample captured at `captured_at`.
    #[must_use]
    pub const fn new(coordinate: Coordinate, captured_at: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            accuracy_meters: None,
            captured_at,
            resolved_address: None,
        }
    }

    /// Returns a copy carrying the horizontal accuracy in metres.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy_meters: f64) -> Self {
        self.accuracy_meters = Some(accuracy_meters);
        self
    }

    /// Returns a copy carrying a human-readable address.
    #[must_use]
    pub fn with_resolved_address(mut self, address: impl Into<String>) -> Self {
        self.resolved_address = Some(address.into());
        self
    }

    /// Returns the sampled coordinate.
    #[must_use]
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Returns the horizontal accuracy in metres, if reported.
    #[must_use]
    pub const fn accuracy_meters(&self) -> Option<f64> {
        self.accuracy_meters
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Returns the resolved address, if any.
    #[must_use]
    pub fn resolved_address(&self) -> Option<&str> {
        self.resolved_address.as_deref()
    }
}
