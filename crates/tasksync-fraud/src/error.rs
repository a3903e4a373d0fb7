//! Fraud assessment error types.

use thiserror::Error;

/// Result type for fraud assessment operations.
pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Errors that can occur while producing a fraud verdict.
///
/// An assessment failure is never a verdict: callers must treat it as an
/// overall failure, not as "not fraudulent".
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The judgment backend could not be reached.
    #[error("judgment backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The judgment backend answered with something that is not a verdict.
    #[error("malformed verdict from judgment backend: {0}")]
    MalformedVerdict(String),
}
