//! The top-level `TaskSync` application object.

use std::sync::Arc;

use tasksync_auth::{IdentityProvider, JwtConfig, SessionVerifier};
use tasksync_fraud::{FraudChecker, VelocityChecker};
use tasksync_sharing::{LinkIssuer, ShareLinkConfig};
use tasksync_store::{MemoryTaskStore, TaskStore};

use crate::error::Result;
use crate::session::SessionHandle;

/// Configuration for a `TaskSync` instance.
#[derive(Debug, Clone)]
pub struct TaskSyncConfig {
    /// JWT settings for session verification.
    pub jwt: JwtConfig,
    /// Link synthesis settings.
    pub share: ShareLinkConfig,
    /// Share requests allowed per minute per identity before the fraud
    /// checker flags a velocity anomaly.
    pub share_velocity_limit: usize,
}

impl TaskSyncConfig {
    /// Creates a configuration with the given JWT secret and defaults
    /// everywhere else.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig::new(jwt_secret),
            share: ShareLinkConfig::default(),
            share_velocity_limit: 5,
        }
    }

    /// Sets the public domain embedded in share links.
    #[must_use]
    pub fn with_share_domain(mut self, domain: impl Into<String>) -> Self {
        self.share = ShareLinkConfig::new(domain);
        self
    }

    /// Sets the share velocity threshold.
    #[must_use]
    pub fn with_share_velocity_limit(mut self, limit: usize) -> Self {
        self.share_velocity_limit = limit;
        self
    }
}

struct Inner {
    store: Arc<dyn TaskStore>,
    identity: Arc<dyn IdentityProvider>,
    issuer: LinkIssuer,
}

/// The `TaskSync` application: task storage, identity verification, and
/// fraud-gated share links behind one handle.
///
/// Cloning is cheap; all clones share the same collaborators.
#[derive(Clone)]
pub struct TaskSync {
    inner: Arc<Inner>,
}

impl TaskSync {
    /// Creates an instance with the default collaborators: in-memory task
    /// store, JWT session verifier, and velocity-window fraud checker.
    pub fn new(config: TaskSyncConfig) -> Self {
        let store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(SessionVerifier::new(config.jwt.clone()));
        let checker: Arc<dyn FraudChecker> =
            Arc::new(VelocityChecker::per_minute(config.share_velocity_limit));

        Self::with_collaborators(store, identity, checker, config.share)
    }

    /// Creates an instance over caller-supplied collaborators.
    ///
    /// This is the seam unit tests use to swap the fraud checker or the
    /// identity provider for deterministic doubles.
    pub fn with_collaborators(
        store: Arc<dyn TaskStore>,
        identity: Arc<dyn IdentityProvider>,
        checker: Arc<dyn FraudChecker>,
        share: ShareLinkConfig,
    ) -> Self {
        let issuer = LinkIssuer::new(identity.clone(), checker, share);
        Self {
            inner: Arc::new(Inner {
                store,
                identity,
                issuer,
            }),
        }
    }

    /// Verifies a credential and returns a session scoped to that user.
    ///
    /// Fails if the credential is missing, invalid, or expired; there is
    /// no anonymous fallback.
    pub fn session(&self, credential: impl Into<String>) -> Result<SessionHandle> {
        let credential = credential.into();
        let user_id = self.inner.identity.verify(&credential)?;
        Ok(SessionHandle::new(self.clone(), user_id, credential))
    }

    pub(crate) fn store(&self) -> &dyn TaskStore {
        self.inner.store.as_ref()
    }

    pub(crate) fn issuer(&self) -> &LinkIssuer {
        &self.inner.issuer
    }
}
