//! Cached device permission state and the transitions that update it.

use crate::location::{
    domain::{PermissionError, PermissionState},
    ports::LocationProvider,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Tracks location permission and service availability.
///
/// The cached state starts as [`PermissionState::Unknown`] and changes only
/// through [`Self::check_current`] and [`Self::request_access`].
/// [`PermissionState::DeniedForever`] is left only after the user changes
/// system settings and a fresh check observes it.
pub struct PermissionStateMachine<P>
where
    P: LocationProvider,
{
    provider: Arc<P>,
    state: RwLock<PermissionState>,
}

impl<P> PermissionStateMachine<P>
where
    P: LocationProvider,
{
    /// Creates a state machine in the `Unknown` state.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            state: RwLock::new(PermissionState::Unknown),
        }
    }

    /// Returns the cached state.
    #[must_use]
    pub fn state(&self) -> PermissionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns whether the cached state grants access.
    #[must_use]
    pub fn has_access(&self) -> bool {
        self.state().has_access()
    }

    /// Fails with the reason access is missing in the cached state.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError`] unless the state grants access.
    pub fn ensure_access(&self) -> Result<(), PermissionError> {
        self.state().access_error().map_or(Ok(()), Err)
    }

    /// Queries the provider without prompting and caches the answer.
    ///
    /// Disabled location services are reported as
    /// [`PermissionState::ServiceDisabled`] regardless of the grant.
    pub async fn check_current(&self) -> PermissionState {
        let observed = if self.provider.is_service_enabled().await {
            self.provider.check_permission().await
        } else {
            PermissionState::ServiceDisabled
        };
        self.record(observed)
    }

    /// Shows the native prompt at most once and caches the outcome.
    ///
    /// Callers present their rationale before invoking this. No prompt is
    /// shown when access is already granted, when the user has permanently
    /// declined, or when location services are off. A cached
    /// [`PermissionState::ServiceDisabled`] is refreshed first, so a grant
    /// made before services were switched off is not asked for again.
    pub async fn request_access(&self) -> PermissionState {
        let cached = match self.state() {
            PermissionState::ServiceDisabled => self.check_current().await,
            state => state,
        };
        if !cached.can_prompt() {
            debug!(state = %cached, "skipping location permission prompt");
            return cached;
        }

        if !self.provider.is_service_enabled().await {
            return self.record(PermissionState::ServiceDisabled);
        }

        let outcome = self.provider.request_permission().await;
        self.record(outcome)
    }

    fn record(&self, observed: PermissionState) -> PermissionState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let previous = *state;
        if previous != observed {
            debug!(from = %previous, to = %observed, "location permission state changed");
        }
        *state = observed;
        observed
    }
}
