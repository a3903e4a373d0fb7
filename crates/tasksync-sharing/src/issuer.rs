//! The share-link issuer.
//!
//! Orchestrates one share request: authenticate the caller, assess the
//! request for fraud, then either synthesize a link or reject. Each call is
//! independent; the issuer holds no cross-call state and any number of
//! calls may run concurrently.

use std::sync::Arc;

use tasksync_auth::IdentityProvider;
use tasksync_fraud::{FraudChecker, RequestFacts};
use tasksync_types::{ShareOutcome, ShareRequest, TaskListId};
use tracing::{debug, error, info, warn};

use crate::error::{IssueError, IssueResult};
use crate::token::LinkToken;

/// Configuration for link synthesis.
#[derive(Debug, Clone)]
pub struct ShareLinkConfig {
    /// Public domain embedded in generated links.
    pub domain: String,
}

impl ShareLinkConfig {
    /// Creates a configuration for the given public domain.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl Default for ShareLinkConfig {
    fn default() -> Self {
        Self {
            domain: "tasksync.com".to_string(),
        }
    }
}

/// Internal decision before collapsing to a [`ShareOutcome`].
enum IssueDecision {
    Granted(String),
    Rejected { reason: Option<String> },
}

/// Issues shareable invite links, gated by fraud assessment.
pub struct LinkIssuer {
    identity: Arc<dyn IdentityProvider>,
    checker: Arc<dyn FraudChecker>,
    config: ShareLinkConfig,
}

impl LinkIssuer {
    /// Creates an issuer over the given collaborators.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        checker: Arc<dyn FraudChecker>,
        config: ShareLinkConfig,
    ) -> Self {
        Self {
            identity,
            checker,
            config,
        }
    }

    /// Runs one share request through the issuance state machine.
    ///
    /// Authentication precedes assessment: if the credential does not
    /// resolve, the fraud checker is never consulted. Every failure path
    /// collapses to [`ShareOutcome::Failed`]; the underlying cause is
    /// logged here and not surfaced to the caller.
    pub fn issue(&self, task_list_id: &TaskListId, credential: &str) -> ShareOutcome {
        match self.try_issue(task_list_id, credential) {
            Ok(IssueDecision::Granted(link)) => ShareOutcome::Link(link),
            Ok(IssueDecision::Rejected { reason }) => {
                warn!(
                    list = %task_list_id,
                    reason = reason.as_deref().unwrap_or("unspecified"),
                    "share request rejected as fraudulent"
                );
                ShareOutcome::Rejected
            }
            Err(e) => {
                error!(list = %task_list_id, error = %e, "share link issuance failed");
                ShareOutcome::Failed
            }
        }
    }

    fn try_issue(&self, task_list_id: &TaskListId, credential: &str) -> IssueResult<IssueDecision> {
        // 1. Authenticate. Never fall back to a default user.
        let user_id = self.identity.verify(credential)?;
        debug!(list = %task_list_id, user = %user_id, "share request authenticated");

        // 2. Assess. An assessment failure is a failure, not a verdict.
        let request = ShareRequest::new(task_list_id.clone(), user_id.clone());
        let facts = RequestFacts::from_request(&request);
        let verdict = self.checker.assess(&facts)?;

        // 3. Branch.
        if verdict.is_fraudulent {
            return Ok(IssueDecision::Rejected {
                reason: verdict.reason,
            });
        }

        let link = self.synthesize(&request);
        info!(list = %task_list_id, user = %user_id, "share link issued");
        Ok(IssueDecision::Granted(link))
    }

    /// Formats a link embedding the list, the user, and a fresh token.
    fn synthesize(&self, request: &ShareRequest) -> String {
        let token = LinkToken::generate();
        format!(
            "{}/share/{}/{}/{}",
            self.config.domain, request.task_list_id, request.user_id, token
        )
    }
}
