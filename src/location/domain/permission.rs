//! Device location-permission state.

use super::{ParsePermissionStateError, PermissionError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location permission and service availability as reported by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet determined.
    #[default]
    Unknown,
    /// Access granted without a finer scope.
    Granted,
    /// Access granted while the application is in use.
    WhileInUse,
    /// Access granted at all times, including in the background.
    Always,
    /// Access denied; the user may still be prompted again.
    Denied,
    /// Access denied permanently; only system settings can change it.
    DeniedForever,
    /// Location services are switched off on the device.
    ServiceDisabled,
}

impl PermissionState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::WhileInUse => "while_in_use",
            Self::Always => "always",
            Self::Denied => "denied",
            Self::DeniedForever => "denied_forever",
            Self::ServiceDisabled => "service_disabled",
        }
    }

    /// Returns whether location data may be read in this state.
    #[must_use]
    pub const fn has_access(self) -> bool {
        matches!(self, Self::Granted | Self::WhileInUse | Self::Always)
    }

    /// Returns whether a permission prompt could still change this state.
    #[must_use]
    pub const fn can_prompt(self) -> bool {
        matches!(self, Self::Unknown | Self::Denied)
    }

    /// Maps a state without access to the error reported to callers.
    #[must_use]
    pub const fn access_error(self) -> Option<PermissionError> {
        match self {
            Self::Granted | Self::WhileInUse | Self::Always => None,
            Self::Unknown | Self::Denied => Some(PermissionError::Denied),
            Self::DeniedForever => Some(PermissionError::DeniedForever),
            Self::ServiceDisabled => Some(PermissionError::ServiceDisabled),
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PermissionState {
    type Error = ParsePermissionStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unknown" => Ok(Self::Unknown),
            "granted" => Ok(Self::Granted),
            "while_in_use" => Ok(Self::WhileInUse),
            "always" => Ok(Self::Always),
            "denied" => Ok(Self::Denied),
            "denied_forever" => Ok(Self::DeniedForever),
            "service_disabled" => Ok(Self::ServiceDisabled),
            _ => Err(ParsePermissionStateError(value.to_owned())),
        }
    }
}
