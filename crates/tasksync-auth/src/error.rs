//! Authentication error types.

use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while resolving a caller's identity.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was supplied.
    #[error("missing credential")]
    MissingCredential,

    /// The credential failed validation.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The credential was valid once but has expired.
    #[error("credential expired")]
    Expired,

    /// The verifier itself failed (clock error, key error).
    #[error("verifier error: {0}")]
    Verifier(String),
}
