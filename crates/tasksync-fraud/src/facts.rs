//! Structured description of a share request, as seen by the checker.

use chrono::{DateTime, Utc};
use tasksync_types::{ShareRequest, TaskListId, UserId};

/// Facts about a share request handed to a [`crate::FraudChecker`].
///
/// Combines the request's identifying fields with optional free-text
/// context (timestamp, recipient) for backends that consume a narrative
/// description rather than structured fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFacts {
    /// The authenticated caller asking for the link.
    pub requester: UserId,
    /// The list the caller wants to share.
    pub task_list_id: TaskListId,
    /// When the request was received.
    pub requested_at: DateTime<Utc>,
    /// Who the invite is meant for, when the caller said so.
    pub recipient: Option<String>,
}

impl RequestFacts {
    /// Builds facts from a share request, stamped with the current time.
    pub fn from_request(request: &ShareRequest) -> Self {
        Self {
            requester: request.user_id.clone(),
            task_list_id: request.task_list_id.clone(),
            requested_at: Utc::now(),
            recipient: None,
        }
    }

    /// Attaches the intended recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Renders the facts as a free-text description for narrative backends.
    pub fn describe(&self) -> String {
        let mut description = format!(
            "share request at {} from user {} for task list {}",
            self.requested_at.to_rfc3339(),
            self.requester,
            self.task_list_id,
        );
        if let Some(recipient) = &self.recipient {
            description.push_str(&format!(", recipient {recipient}"));
        }
        description
    }
}
