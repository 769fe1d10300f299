//! Adapter implementations for the location provider and trigger store ports.

pub mod memory;

mod provider;

pub use provider::InMemoryLocationProvider;
