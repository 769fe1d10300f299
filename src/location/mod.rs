//! Location-based task triggers.
//!
//! This module validates geographic input, resolves free-text addresses to
//! coordinates through a location provider, tracks device location-permission
//! state, and manages geofence-backed triggers attached to tasks. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure validation and sanitization rules in [`validation`]
//! - Port contracts for the location provider and trigger store in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Services in [`services`], configured through [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
