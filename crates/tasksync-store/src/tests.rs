//! Unit tests for tasksync-store

use tasksync_types::{TaskDraft, TaskId, TaskPatch, TaskStatus, UserId};

use crate::{MemoryTaskStore, StoreError, TaskStore};

fn alice() -> UserId {
    UserId::new("alice")
}

fn bob() -> UserId {
    UserId::new("bob")
}

#[test]
fn add_and_list() {
    let store = MemoryTaskStore::new();

    let task = store.add_task(&alice(), TaskDraft::new("Buy milk")).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert!(!task.id.as_str().is_empty());

    let tasks = store.list_tasks(&alice()).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], task);
}

#[test]
fn short_title_rejected() {
    let store = MemoryTaskStore::new();

    let result = store.add_task(&alice(), TaskDraft::new("no"));
    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert!(store.is_empty());
}

#[test]
fn short_title_rejected_on_update() {
    let store = MemoryTaskStore::new();
    let task = store.add_task(&alice(), TaskDraft::new("Buy milk")).unwrap();

    let result = store.update_task(&alice(), &task.id, TaskPatch::new().title("ab"));
    assert!(matches!(result, Err(StoreError::Validation(_))));

    // Record unchanged
    let current = store.get_task(&alice(), &task.id).unwrap();
    assert_eq!(current.title, "Buy milk");
}

#[test]
fn listing_is_owner_scoped() {
    let store = MemoryTaskStore::new();
    store.add_task(&alice(), TaskDraft::new("Alice's task")).unwrap();
    store.add_task(&bob(), TaskDraft::new("Bob's task")).unwrap();

    let tasks = store.list_tasks(&alice()).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Alice's task");
}

#[test]
fn completed_tasks_sort_last() {
    let store = MemoryTaskStore::new();
    store
        .add_task(
            &alice(),
            TaskDraft::new("Done already").with_status(TaskStatus::Completed),
        )
        .unwrap();
    store.add_task(&alice(), TaskDraft::new("Still open")).unwrap();
    store
        .add_task(
            &alice(),
            TaskDraft::new("In flight").with_status(TaskStatus::InProgress),
        )
        .unwrap();

    let tasks = store.list_tasks(&alice()).unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Still open", "In flight", "Done already"]);
}

#[test]
fn update_applies_patch_fields() {
    let store = MemoryTaskStore::new();
    let task = store.add_task(&alice(), TaskDraft::new("Draft title")).unwrap();

    let updated = store
        .update_task(
            &alice(),
            &task.id,
            TaskPatch::new()
                .title("Final title")
                .description("now with details")
                .status(TaskStatus::InProgress),
        )
        .unwrap();

    assert_eq!(updated.title, "Final title");
    assert_eq!(updated.description.as_deref(), Some("now with details"));
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[test]
fn update_requires_ownership() {
    let store = MemoryTaskStore::new();
    let task = store.add_task(&alice(), TaskDraft::new("Alice's task")).unwrap();

    let result = store.update_task(&bob(), &task.id, TaskPatch::new().title("stolen"));
    assert!(matches!(result, Err(StoreError::PermissionDenied(_))));

    // Record unchanged
    let current = store.get_task(&alice(), &task.id).unwrap();
    assert_eq!(current.title, "Alice's task");
}

#[test]
fn delete_requires_ownership() {
    let store = MemoryTaskStore::new();
    let task = store.add_task(&alice(), TaskDraft::new("Alice's task")).unwrap();

    let result = store.delete_task(&bob(), &task.id);
    assert!(matches!(result, Err(StoreError::PermissionDenied(_))));
    assert_eq!(store.len(), 1);

    store.delete_task(&alice(), &task.id).unwrap();
    assert!(store.is_empty());
}

#[test]
fn missing_task_is_not_found() {
    let store = MemoryTaskStore::new();
    let missing = TaskId::new("task-999");

    assert!(matches!(
        store.get_task(&alice(), &missing),
        Err(StoreError::TaskNotFound(_))
    ));
    assert!(matches!(
        store.delete_task(&alice(), &missing),
        Err(StoreError::TaskNotFound(_))
    ));
}

#[test]
fn ids_are_unique_across_tasks() {
    let store = MemoryTaskStore::new();
    let a = store.add_task(&alice(), TaskDraft::new("First task")).unwrap();
    let b = store.add_task(&alice(), TaskDraft::new("Second task")).unwrap();
    assert_ne!(a.id, b.id);
}
