//! Domain model for tasks that can carry location triggers.
//!
//! Tasks are owned by an external task store. The domain here only models the
//! values the location-trigger orchestration needs: identity, a validated
//! title, optional notes, and lifecycle timestamps.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task, TaskDraft};
