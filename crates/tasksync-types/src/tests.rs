//! Unit tests for tasksync-types

use crate::{
    FraudVerdict, ShareOutcome, ShareRequest, TaskDraft, TaskListId, TaskPatch, TaskStatus, UserId,
    DEFAULT_TASK_LIST, ERROR_SENTINEL, FRAUDULENT_SENTINEL,
};

// ============================================================================
// ID Type Tests
// ============================================================================

#[test]
fn user_id_roundtrip() {
    let id = UserId::new("u9");
    assert_eq!(id.as_str(), "u9");
    let raw: String = id.into();
    assert_eq!(raw, "u9");
}

#[test]
fn task_list_id_display() {
    let id = TaskListId::new("list-42");
    assert_eq!(id.to_string(), "list-42");
}

#[test]
fn default_list_id() {
    assert_eq!(TaskListId::default_list().as_str(), DEFAULT_TASK_LIST);
}

// ============================================================================
// Task Model Tests
// ============================================================================

#[test]
fn status_labels() {
    assert_eq!(TaskStatus::ToDo.to_string(), "To Do");
    assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
    assert_eq!(TaskStatus::Completed.to_string(), "Completed");
}

#[test]
fn status_serde_uses_column_labels() {
    let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
    assert_eq!(json, "\"In Progress\"");
    let back: TaskStatus = serde_json::from_str("\"To Do\"").unwrap();
    assert_eq!(back, TaskStatus::ToDo);
}

#[test]
fn only_completed_is_completed() {
    assert!(TaskStatus::Completed.is_completed());
    assert!(!TaskStatus::ToDo.is_completed());
    assert!(!TaskStatus::InProgress.is_completed());
}

#[test]
fn draft_defaults_to_todo() {
    let draft = TaskDraft::new("Write tests");
    assert_eq!(draft.status, TaskStatus::ToDo);
    assert!(draft.description.is_none());
    assert!(draft.due_date.is_none());
}

#[test]
fn draft_into_task_keeps_fields() {
    let task = TaskDraft::new("Ship it")
        .with_description("before Friday")
        .with_status(TaskStatus::InProgress)
        .into_task("t1".into());
    assert_eq!(task.id.as_str(), "t1");
    assert_eq!(task.title, "Ship it");
    assert_eq!(task.description.as_deref(), Some("before Friday"));
    assert_eq!(task.status, TaskStatus::InProgress);
}

#[test]
fn empty_patch_is_empty() {
    assert!(TaskPatch::new().is_empty());
    assert!(!TaskPatch::new().status(TaskStatus::Completed).is_empty());
}

// ============================================================================
// Share Workflow Tests
// ============================================================================

#[test]
fn share_request_fields() {
    let req = ShareRequest::new("list-42", "u9");
    assert_eq!(req.task_list_id.as_str(), "list-42");
    assert_eq!(req.user_id.as_str(), "u9");
}

#[test]
fn clean_verdict_has_no_reason() {
    let verdict = FraudVerdict::clean();
    assert!(!verdict.is_fraudulent);
    assert!(verdict.reason.is_none());
}

#[test]
fn fraudulent_verdict_carries_reason() {
    let verdict = FraudVerdict::fraudulent("velocity anomaly");
    assert!(verdict.is_fraudulent);
    assert_eq!(verdict.reason.as_deref(), Some("velocity anomaly"));
}

#[test]
fn outcome_share_strings() {
    let link = "tasksync.com/share/list-42/u9/abc123".to_string();
    assert_eq!(ShareOutcome::Link(link.clone()).into_share_string(), link);
    assert_eq!(
        ShareOutcome::Rejected.into_share_string(),
        FRAUDULENT_SENTINEL
    );
    assert_eq!(ShareOutcome::Failed.into_share_string(), ERROR_SENTINEL);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn id_roundtrip_user_id(id in "[a-zA-Z0-9-]{1,32}") {
            let user_id = UserId::new(id.clone());
            prop_assert_eq!(user_id.as_str(), id.as_str());
        }

        #[test]
        fn verdict_reason_iff_fraudulent_constructors(reason in ".{1,64}") {
            prop_assert!(FraudVerdict::fraudulent(reason).reason.is_some());
            prop_assert!(FraudVerdict::clean().reason.is_none());
        }
    }
}
