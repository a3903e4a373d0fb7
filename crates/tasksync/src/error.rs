//! Error types for the TaskSync SDK.
//!
//! This module provides a unified error type that wraps errors from the
//! underlying subsystems: identity verification and the task store.

use tasksync_auth::AuthError;
use tasksync_store::StoreError;
use thiserror::Error;

/// Result type for TaskSync operations.
pub type Result<T> = std::result::Result<T, TaskSyncError>;

/// Errors that can occur during TaskSync operations.
#[derive(Debug, Error)]
pub enum TaskSyncError {
    /// The caller's credential could not be verified.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Error from the task store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal error (should not occur in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl TaskSyncError {
    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
