//! JWT session verification.
//!
//! Sessions are HS256 tokens carrying the user id in the `sub` claim,
//! minted at sign-in and presented with every request.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tasksync_types::UserId;

use crate::error::{AuthError, AuthResult};
use crate::IdentityProvider;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing/verifying tokens.
    secret: String,
    /// Token expiration duration.
    pub expiration: Duration,
    /// Issuer claim.
    pub issuer: String,
    /// Audience claims.
    pub audience: Vec<String>,
}

impl JwtConfig {
    /// Creates a new JWT configuration.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration: Duration::from_secs(3600), // 1 hour
            issuer: "tasksync".to_string(),
            audience: vec!["tasksync".to_string()],
        }
    }

    /// Sets the token expiration duration.
    #[must_use]
    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    /// Sets the issuer claim.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Adds an audience claim.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience.push(audience.into());
        self
    }
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Issued at timestamp (seconds since epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: u64,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: Vec<String>,
}

/// Verifies JWT session tokens and mints them for sign-in flows.
pub struct SessionVerifier {
    config: JwtConfig,
}

impl SessionVerifier {
    /// Creates a new verifier from a JWT configuration.
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Creates a session token for a user.
    pub fn create_session_token(&self, user_id: &UserId) -> AuthResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::Verifier(format!("time error: {e}")))?;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: now.as_secs(),
            exp: (now + self.config.expiration).as_secs(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Verifier(format!("failed to create token: {e}")))
    }
}

impl IdentityProvider for SessionVerifier {
    fn verify(&self, credential: &str) -> AuthResult<UserId> {
        if credential.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&self.config.audience);

        let token_data = decode::<Claims>(
            credential,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidCredential(e.to_string()),
        })?;

        Ok(UserId::new(token_data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> SessionVerifier {
        SessionVerifier::new(JwtConfig::new("test-secret-key-that-is-long-enough"))
    }

    #[test]
    fn test_session_roundtrip() {
        let verifier = verifier();
        let token = verifier
            .create_session_token(&UserId::new("user123"))
            .unwrap();

        let user_id = verifier.verify(&token).unwrap();
        assert_eq!(user_id, UserId::new("user123"));
    }

    #[test]
    fn test_missing_credential() {
        let result = verifier().verify("");
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[test]
    fn test_garbage_credential() {
        let result = verifier().verify("not-a-jwt");
        assert!(matches!(result, Err(AuthError::InvalidCredential(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = verifier()
            .create_session_token(&UserId::new("user123"))
            .unwrap();

        let other = SessionVerifier::new(JwtConfig::new("a-completely-different-secret"));
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let minting = SessionVerifier::new(
            JwtConfig::new("shared-secret").with_issuer("someone-else"),
        );
        let token = minting
            .create_session_token(&UserId::new("user123"))
            .unwrap();

        let verifying = SessionVerifier::new(JwtConfig::new("shared-secret"));
        assert!(verifying.verify(&token).is_err());
    }
}
