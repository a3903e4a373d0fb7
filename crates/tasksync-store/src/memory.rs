//! In-memory task store.
//!
//! Documents live in a `HashMap` guarded by an `RwLock`, with a per-owner
//! index preserving insertion order for stable listings.

use std::collections::HashMap;
use std::sync::RwLock;

use tasksync_types::{Task, TaskDraft, TaskId, TaskPatch, UserId, MIN_TITLE_LEN};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::TaskStore;

/// A stored task document plus its owner.
#[derive(Debug, Clone)]
struct StoredTask {
    owner: UserId,
    task: Task,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: HashMap<TaskId, StoredTask>,
    /// Task ids per owner, in insertion order.
    by_owner: HashMap<UserId, Vec<TaskId>>,
    next_id: u64,
}

/// In-memory [`TaskStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl MemoryTaskStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored tasks across all owners.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.tasks.len()).unwrap_or(0)
    }

    /// Returns true if no tasks are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rejects drafts and patches that would store an invalid title.
fn validate_title(title: &str) -> StoreResult<()> {
    if title.chars().count() < MIN_TITLE_LEN {
        return Err(StoreError::Validation(format!(
            "title must be at least {MIN_TITLE_LEN} characters long"
        )));
    }
    Ok(())
}

impl TaskStore for MemoryTaskStore {
    fn list_tasks(&self, owner: &UserId) -> StoreResult<Vec<Task>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        let mut tasks: Vec<Task> = inner
            .by_owner
            .get(owner)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| inner.tasks.get(id))
                    .map(|stored| stored.task.clone())
                    .collect()
            })
            .unwrap_or_default();

        // Completed tasks sink to the bottom of the board; everything else
        // keeps insertion order.
        tasks.sort_by_key(|t| t.status.is_completed());

        Ok(tasks)
    }

    fn get_task(&self, owner: &UserId, id: &TaskId) -> StoreResult<Task> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        let stored = inner
            .tasks
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))?;

        if stored.owner != *owner {
            return Err(StoreError::PermissionDenied(id.clone()));
        }

        Ok(stored.task.clone())
    }

    fn add_task(&self, owner: &UserId, draft: TaskDraft) -> StoreResult<Task> {
        validate_title(&draft.title)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        inner.next_id += 1;
        let id = TaskId::new(format!("task-{}", inner.next_id));
        let task = draft.into_task(id.clone());

        inner.tasks.insert(
            id.clone(),
            StoredTask {
                owner: owner.clone(),
                task: task.clone(),
            },
        );
        inner.by_owner.entry(owner.clone()).or_default().push(id.clone());

        debug!(user = %owner, task = %id, "task created");
        Ok(task)
    }

    fn update_task(&self, owner: &UserId, id: &TaskId, patch: TaskPatch) -> StoreResult<Task> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        let stored = inner
            .tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))?;

        if stored.owner != *owner {
            return Err(StoreError::PermissionDenied(id.clone()));
        }

        if let Some(title) = patch.title {
            stored.task.title = title;
        }
        if let Some(description) = patch.description {
            stored.task.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            stored.task.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            stored.task.status = status;
        }

        debug!(user = %owner, task = %id, "task updated");
        Ok(stored.task.clone())
    }

    fn delete_task(&self, owner: &UserId, id: &TaskId) -> StoreResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        let stored = inner
            .tasks
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))?;

        if stored.owner != *owner {
            return Err(StoreError::PermissionDenied(id.clone()));
        }

        inner.tasks.remove(id);
        if let Some(ids) = inner.by_owner.get_mut(owner) {
            ids.retain(|t| t != id);
        }

        debug!(user = %owner, task = %id, "task deleted");
        Ok(())
    }
}
