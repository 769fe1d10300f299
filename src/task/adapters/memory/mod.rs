//! In-memory adapters for task persistence.

mod task;

pub use task::{InMemoryTaskStore, TaskStoreOperation};
