//! Configuration for the location services.
//!
//! # Examples
//!
//! ```
//! use geotask::location::config::LocationSearchConfig;
//! use std::time::Duration;
//!
//! let config = LocationSearchConfig::default();
//! assert_eq!(config.debounce, Duration::from_millis(300));
//!
//! let immediate = LocationSearchConfig::immediate();
//! assert_eq!(immediate.debounce, Duration::ZERO);
//! ```

use std::time::Duration;

/// Quiet period applied to search input before geocoding.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Settings for [`crate::location::services::LocationSearchCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSearchConfig {
    /// Time without new input before a lookup starts.
    pub debounce: Duration,
    /// Upper bound for a single forward lookup; `None` waits indefinitely.
    pub geocode_timeout: Option<Duration>,
}

impl Default for LocationSearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            geocode_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl LocationSearchConfig {
    /// Creates a configuration that looks up every change without delay.
    ///
    /// Useful for scripted flows where input is not typed by a user.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            debounce: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Settings for [`crate::location::services::CurrentLocationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentLocationConfig {
    /// Upper bound for acquiring a position fix.
    pub position_timeout: Duration,
    /// Whether to reverse geocode the fix into a readable address.
    pub resolve_address: bool,
}

impl Default for CurrentLocationConfig {
    fn default() -> Self {
        Self {
            position_timeout: Duration::from_secs(15),
            resolve_address: true,
        }
    }
}
