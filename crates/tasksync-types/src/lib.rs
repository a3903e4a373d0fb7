//! # tasksync-types: Core types for `TaskSync`
//!
//! This crate contains shared types used across the `TaskSync` system:
//! - Entity IDs ([`UserId`], [`TaskListId`], [`TaskId`])
//! - The task model ([`Task`], [`TaskStatus`], [`TaskDraft`], [`TaskPatch`])
//! - Share workflow types ([`ShareRequest`], [`FraudVerdict`], [`ShareOutcome`])

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task list id used when a board has not been split into named lists.
pub const DEFAULT_TASK_LIST: &str = "default-list";

/// Minimum accepted task title length, in characters.
pub const MIN_TITLE_LEN: usize = 3;

/// Sentinel returned in place of a link when the share request was judged
/// fraudulent.
pub const FRAUDULENT_SENTINEL: &str = "FRAUDULENT";

/// Sentinel returned in place of a link when any part of issuance failed.
pub const ERROR_SENTINEL: &str = "ERROR";

// ============================================================================
// Entity IDs - string-backed (document store and identity subjects are
// opaque strings)
// ============================================================================

/// Stable identifier for an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Identifier for a shareable task list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskListId(String);

impl TaskListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The implicit list every board starts with.
    pub fn default_list() -> Self {
        Self(DEFAULT_TASK_LIST.to_string())
    }
}

impl Display for TaskListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<TaskListId> for String {
    fn from(id: TaskListId) -> Self {
        id.0
    }
}

/// Identifier for a single task document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

// ============================================================================
// Task model
// ============================================================================

/// Column a task currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Human-readable column label.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A task document.
///
/// Carried verbatim over the wire protocol, so optional fields are encoded
/// as explicit `Option`s rather than skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

/// Fields for a task that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Creates a draft in the `To Do` column.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::ToDo,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Attaches an id, producing a full task.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: self.status,
        }
    }
}

/// Partial update for a task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

// ============================================================================
// Share workflow types
// ============================================================================

/// Immutable input to the share-link workflow. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareRequest {
    pub task_list_id: TaskListId,
    pub user_id: UserId,
}

impl ShareRequest {
    pub fn new(task_list_id: impl Into<TaskListId>, user_id: impl Into<UserId>) -> Self {
        Self {
            task_list_id: task_list_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Fraud determination for a single share request.
///
/// Produced fresh per request; not cached, not persisted. The reason is
/// populated only on a positive verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudVerdict {
    pub is_fraudulent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FraudVerdict {
    /// A clean verdict (not fraudulent, no reason).
    pub fn clean() -> Self {
        Self {
            is_fraudulent: false,
            reason: None,
        }
    }

    /// A positive fraud verdict with its reason.
    pub fn fraudulent(reason: impl Into<String>) -> Self {
        Self {
            is_fraudulent: true,
            reason: Some(reason.into()),
        }
    }
}

/// Terminal outcome of one share-link issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareOutcome {
    /// A unique, non-guessable link was issued.
    Link(String),
    /// The fraud verdict was positive; no link was issued.
    Rejected,
    /// Authentication, assessment, or synthesis failed.
    Failed,
}

impl ShareOutcome {
    pub fn is_link(&self) -> bool {
        matches!(self, ShareOutcome::Link(_))
    }

    /// Collapses the outcome into the string the rest of the application
    /// consumes: a real link, `"FRAUDULENT"`, or `"ERROR"`.
    ///
    /// These three shapes are the entire wire contract; callers distinguish
    /// outcomes by comparing against the sentinels.
    pub fn into_share_string(self) -> String {
        match self {
            ShareOutcome::Link(link) => link,
            ShareOutcome::Rejected => FRAUDULENT_SENTINEL.to_string(),
            ShareOutcome::Failed => ERROR_SENTINEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
