//! # tasksync-store: Task persistence for `TaskSync`
//!
//! Owner-scoped CRUD over task documents. All access control lives at this
//! layer: every read is filtered to the owning user and every mutation
//! verifies the record's owner before touching it.

mod error;
mod memory;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryTaskStore;

use tasksync_types::{Task, TaskDraft, TaskId, TaskPatch, UserId};

/// Owner-scoped task persistence.
///
/// One ownership policy applies to every implementation: mutations verify
/// that the record belongs to the caller, reads are filtered by owner.
pub trait TaskStore: Send + Sync {
    /// Returns the caller's tasks, completed tasks last.
    fn list_tasks(&self, owner: &UserId) -> StoreResult<Vec<Task>>;

    /// Fetches a single task owned by the caller.
    fn get_task(&self, owner: &UserId, id: &TaskId) -> StoreResult<Task>;

    /// Validates and stores a new task, assigning it an id.
    fn add_task(&self, owner: &UserId, draft: TaskDraft) -> StoreResult<Task>;

    /// Applies a partial update to a task the caller owns.
    fn update_task(&self, owner: &UserId, id: &TaskId, patch: TaskPatch) -> StoreResult<Task>;

    /// Deletes a task the caller owns.
    fn delete_task(&self, owner: &UserId, id: &TaskId) -> StoreResult<()>;
}
