//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds {max} characters (found {actual})")]
    TitleTooLong {
        /// Maximum accepted character count.
        max: usize,
        /// Character count of the rejected title.
        actual: usize,
    },
}
