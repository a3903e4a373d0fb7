//! Task store error types.

use tasksync_types::TaskId;
use thiserror::Error;

/// Result type for task store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during task store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task with this id exists.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task exists but belongs to a different user.
    #[error("user does not have permission to modify task {0}")]
    PermissionDenied(TaskId),

    /// The task data failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Internal error (should not occur in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
