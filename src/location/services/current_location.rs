//! "Use current location": permission, position fix, and address lookup.

use crate::location::{
    config::CurrentLocationConfig,
    domain::{LocationSample, LocationValidationError, PermissionError},
    ports::{LocationProvider, LocationProviderError},
    services::PermissionStateMachine,
    validation::coordinate_validation_error,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Whether [`CurrentLocationService::resolve`] may show a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPolicy {
    /// Use the permission state as it is.
    Never,
    /// Prompt when access is undetermined or was declined without
    /// "don't ask again". The caller has already shown its rationale.
    IfPromptable,
}

/// Failures resolving the device location.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CurrentLocationError {
    /// Location access is missing.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// The provider could not produce a fix.
    #[error(transparent)]
    Provider(#[from] LocationProviderError),
    /// The provider produced an out-of-range coordinate.
    #[error(transparent)]
    Validation(#[from] LocationValidationError),
}

/// Resolves the device position into a validated [`LocationSample`].
pub struct CurrentLocationService<P>
where
    P: LocationProvider,
{
    provider: Arc<P>,
    permissions: Arc<PermissionStateMachine<P>>,
    config: CurrentLocationConfig,
}

impl<P> CurrentLocationService<P>
where
    P: LocationProvider,
{
    /// Creates a service sharing `permissions` with other callers.
    #[must_use]
    pub const fn new(
        provider: Arc<P>,
        permissions: Arc<PermissionStateMachine<P>>,
        config: CurrentLocationConfig,
    ) -> Self {
        Self {
            provider,
            permissions,
            config,
        }
    }

    /// Returns the shared permission state machine.
    #[must_use]
    pub const fn permissions(&self) -> &Arc<PermissionStateMachine<P>> {
        &self.permissions
    }

    /// Resolves the current position.
    ///
    /// The fix is validated before it is returned. When configured, the
    /// coordinate is reverse geocoded into an address; a failed address
    /// lookup is logged and the sample is returned without one.
    ///
    /// # Errors
    ///
    /// Returns [`CurrentLocationError::Permission`] when access is missing,
    /// [`CurrentLocationError::Provider`] when no fix arrives within the
    /// configured timeout, and [`CurrentLocationError::Validation`] when the
    /// fix is out of range.
    pub async fn resolve(
        &self,
        policy: PromptPolicy,
    ) -> Result<LocationSample, CurrentLocationError> {
        let mut state = self.permissions.check_current().await;
        if policy == PromptPolicy::IfPromptable && state.can_prompt() {
            state = self.permissions.request_access().await;
        }
        if let Some(err) = state.access_error() {
            return Err(err.into());
        }

        let fix = tokio::time::timeout(
            self.config.position_timeout,
            self.provider.get_current_position(),
        )
        .await
        .map_err(|_elapsed| LocationProviderError::Timeout)?;
        let sample = fix?;

        if let Some(err) = coordinate_validation_error(Some(sample.coordinate())) {
            return Err(err.into());
        }

        if !self.config.resolve_address || sample.resolved_address().is_some() {
            return Ok(sample);
        }

        match self.provider.reverse_geocode(*sample.coordinate()).await {
            Ok(Some(address)) => Ok(sample.with_resolved_address(address)),
            Ok(None) => Ok(sample),
            Err(err) => {
                warn!(error = %err, "reverse geocoding of current location failed");
                Ok(sample)
            }
        }
    }
}
