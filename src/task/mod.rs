//! Tasks that carry location triggers.
//!
//! The task store is an external collaborator; this module owns the
//! orchestration that writes a task and its trigger without a shared
//! transaction, undoing the task write when the trigger step fails.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
