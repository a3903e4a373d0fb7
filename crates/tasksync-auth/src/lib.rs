//! # tasksync-auth: Identity verification for `TaskSync`
//!
//! Resolves a caller credential to a stable [`UserId`]. The rest of the
//! system only sees the [`IdentityProvider`] trait; the shipped
//! implementation is a JWT session verifier ([`SessionVerifier`]).

mod error;
mod verifier;

pub use error::{AuthError, AuthResult};
pub use verifier::{Claims, JwtConfig, SessionVerifier};

use tasksync_types::UserId;

/// Resolves a caller's identity from a credential.
///
/// Implementations must never substitute a default user: an invalid,
/// missing, or expired credential is an error, full stop.
pub trait IdentityProvider: Send + Sync {
    /// Verifies a credential and yields the stable user identifier.
    fn verify(&self, credential: &str) -> AuthResult<UserId>;
}
