//! Scripted in-memory location provider.

use crate::location::{
    domain::{Coordinate, LocationSample, PermissionState},
    ports::{GeocodingError, LocationProvider, LocationProviderError},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// In-memory location provider.
///
/// Models the device without sensors or network access: permission answers,
/// the current position, and geocoding results are scripted up front, and
/// every forward lookup and permission prompt is recorded. Scripted latency
/// is served with `tokio::time::sleep`, so tests running on a paused clock
/// stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationProvider {
    state: Arc<RwLock<InMemoryProviderState>>,
}

#[derive(Debug)]
struct InMemoryProviderState {
    permission: PermissionState,
    prompt_outcome: Option<PermissionState>,
    service_enabled: bool,
    position: Result<LocationSample, LocationProviderError>,
    position_latency: Duration,
    forward: HashMap<String, ScriptedLookup>,
    reverse: HashMap<String, Result<Option<String>, GeocodingError>>,
    forward_queries: Vec<String>,
    permission_prompts: usize,
}

#[derive(Debug, Clone)]
struct ScriptedLookup {
    outcome: Result<Option<LocationSample>, GeocodingError>,
    latency: Duration,
}

impl Default for InMemoryProviderState {
    fn default() -> Self {
        Self {
            permission: PermissionState::Unknown,
            prompt_outcome: None,
            service_enabled: true,
            position: Err(LocationProviderError::Unavailable(
                "no position scripted".to_owned(),
            )),
            position_latency: Duration::ZERO,
            forward: HashMap::new(),
            reverse: HashMap::new(),
            forward_queries: Vec::new(),
            permission_prompts: 0,
        }
    }
}

/// Keys reverse lookups by the coordinate's display form.
fn reverse_key(coordinate: &Coordinate) -> String {
    coordinate.to_string()
}

impl InMemoryLocationProvider {
    /// Creates a provider with undetermined permission, services enabled, and
    /// nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state reported by permission checks.
    pub fn set_permission(&self, permission: PermissionState) {
        self.write().permission = permission;
    }

    /// Sets the outcome of the next permission prompts.
    pub fn set_prompt_outcome(&self, outcome: PermissionState) {
        self.write().prompt_outcome = Some(outcome);
    }

    /// Switches device location services on or off.
    pub fn set_service_enabled(&self, enabled: bool) {
        self.write().service_enabled = enabled;
    }

    /// Scripts the current-position answer.
    pub fn set_position(&self, position: Result<LocationSample, LocationProviderError>) {
        self.write().position = position;
    }

    /// Delays current-position answers by `latency`.
    pub fn set_position_latency(&self, latency: Duration) {
        self.write().position_latency = latency;
    }

    /// Scripts the answer for a forward lookup of `text`.
    pub fn script_forward(
        &self,
        text: impl Into<String>,
        outcome: Result<Option<LocationSample>, GeocodingError>,
    ) {
        self.script_forward_with_latency(text, outcome, Duration::ZERO);
    }

    /// Scripts a forward lookup answer delivered after `latency`.
    pub fn script_forward_with_latency(
        &self,
        text: impl Into<String>,
        outcome: Result<Option<LocationSample>, GeocodingError>,
        latency: Duration,
    ) {
        self.write()
            .forward
            .insert(text.into(), ScriptedLookup { outcome, latency });
    }

    /// Scripts the answer for a reverse lookup of `coordinate`.
    pub fn script_reverse(
        &self,
        coordinate: &Coordinate,
        outcome: Result<Option<String>, GeocodingError>,
    ) {
        self.write().reverse.insert(reverse_key(coordinate), outcome);
    }

    /// Returns every forward lookup text received, oldest first.
    #[must_use]
    pub fn forward_queries(&self) -> Vec<String> {
        self.read().forward_queries.clone()
    }

    /// Returns how many permission prompts were shown.
    #[must_use]
    pub fn permission_prompts(&self) -> usize {
        self.read().permission_prompts
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryProviderState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryProviderState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LocationProvider for InMemoryLocationProvider {
    async fn get_current_position(&self) -> Result<LocationSample, LocationProviderError> {
        let (position, latency) = {
            let state = self.read();
            (state.position.clone(), state.position_latency)
        };
        tokio::time::sleep(latency).await;
        position
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodingError> {
        self.read()
            .reverse
            .get(&reverse_key(&coordinate))
            .cloned()
            .unwrap_or(Ok(None))
    }

    async fn forward_geocode(&self, text: &str) -> Result<Option<LocationSample>, GeocodingError> {
        let scripted = {
            let mut state = self.write();
            state.forward_queries.push(text.to_owned());
            state.forward.get(text).cloned()
        };
        let Some(lookup) = scripted else {
            return Ok(None);
        };
        tokio::time::sleep(lookup.latency).await;
        lookup.outcome
    }

    async fn check_permission(&self) -> PermissionState {
        self.read().permission
    }

    async fn request_permission(&self) -> PermissionState {
        let mut state = self.write();
        state.permission_prompts += 1;
        if let Some(outcome) = state.prompt_outcome {
            state.permission = outcome;
        }
        state.permission
    }

    async fn is_service_enabled(&self) -> bool {
        self.read().service_enabled
    }
}
