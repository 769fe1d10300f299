//! Geotask: location-based triggers for tasks.
//!
//! This crate turns free-text searches or the device position into
//! validated coordinates, manages the geofence triggers attached to tasks,
//! and writes a task together with its trigger as a compensating saga.
//!
//! # Architecture
//!
//! Geotask follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the location provider and stores
//! - **Adapters**: In-memory implementations of those ports
//!
//! # Modules
//!
//! - [`location`]: Validation, permissions, search, and geofence triggers
//! - [`task`]: Task records and the task-with-trigger orchestration

pub mod location;
pub mod task;
