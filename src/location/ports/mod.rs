//! Port contracts for the location subsystem's external collaborators.

mod provider;
mod trigger_store;

pub use provider::{GeocodingError, LocationProvider, LocationProviderError};
pub use trigger_store::{TriggerStore, TriggerStoreError, TriggerStoreResult};

#[cfg(test)]
pub use trigger_store::MockTriggerStore;
