//! Share-link issuance error types.
//!
//! These errors exist for logging and telemetry only: at the application
//! boundary every one of them collapses to the `"ERROR"` sentinel, and
//! callers never learn which stage failed.

use tasksync_auth::AuthError;
use tasksync_fraud::AssessmentError;
use thiserror::Error;

/// Result type for issuance operations.
pub type IssueResult<T> = Result<T, IssueError>;

/// Errors that can occur while issuing a share link.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The caller's credential could not be resolved to an identity.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The fraud assessment could not produce a verdict.
    #[error("fraud assessment failed: {0}")]
    Assessment(#[from] AssessmentError),

    /// Link synthesis failed unexpectedly.
    #[error("link synthesis failed: {0}")]
    Synthesis(String),
}
