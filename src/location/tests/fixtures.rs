//! Shared fixtures for location service tests.

use crate::location::{
    adapters::{InMemoryLocationProvider, memory::InMemoryTriggerStore},
    domain::{
        Coordinate, GeofenceSpec, LocationSample, LocationTrigger, TriggerKind, TriggerTemplate,
    },
};
use crate::task::domain::TaskId;
use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

pub const SAN_FRANCISCO: Coordinate = Coordinate::new(37.7749, -122.4194);

pub fn sample_at(latitude: f64, longitude: f64) -> LocationSample {
    LocationSample::new(Coordinate::new(latitude, longitude), Utc::now())
}

pub fn geofence(name: &str, radius_meters: f64, kind: TriggerKind) -> GeofenceSpec {
    GeofenceSpec::new(name, SAN_FRANCISCO, radius_meters, kind, &DefaultClock)
}

pub fn trigger_for(task_id: TaskId, geofence: GeofenceSpec) -> LocationTrigger {
    TriggerTemplate::new(geofence, &DefaultClock).finalize(task_id)
}

#[fixture]
pub fn provider() -> Arc<InMemoryLocationProvider> {
    Arc::new(InMemoryLocationProvider::new())
}

#[fixture]
pub fn trigger_store() -> Arc<InMemoryTriggerStore> {
    Arc::new(InMemoryTriggerStore::new())
}
