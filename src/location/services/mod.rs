//! Application services for location input and geofence triggers.

mod current_location;
mod debounce;
mod geofence;
mod permission;
mod search;

pub use current_location::{CurrentLocationError, CurrentLocationService, PromptPolicy};
pub use debounce::DebounceTimer;
pub use geofence::{GeofenceTriggerError, GeofenceTriggerManager, GeofenceTriggerResult};
pub use permission::PermissionStateMachine;
pub use search::{LocationSearchCoordinator, LocationSearchError, SearchSnapshot};
