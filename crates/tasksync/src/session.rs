//! User-scoped handle for board operations.
//!
//! A `SessionHandle` provides operations scoped to an authenticated user.
//! The credential is verified when the session is created; the share
//! workflow re-verifies it per request, since issuance runs its own
//! authenticate step.

use tasksync_types::{ShareOutcome, Task, TaskDraft, TaskId, TaskListId, TaskPatch, UserId};

use crate::app::TaskSync;
use crate::error::Result;

/// A user-scoped handle for board operations.
///
/// # Example
///
/// ```ignore
/// let app = TaskSync::new(TaskSyncConfig::new(secret));
/// let session = app.session(id_token)?;
///
/// let task = session.add_task(TaskDraft::new("Water the plants"))?;
/// let share = session.share_list(&TaskListId::default_list());
/// ```
pub struct SessionHandle {
    app: TaskSync,
    user_id: UserId,
    credential: String,
}

impl SessionHandle {
    pub(crate) fn new(app: TaskSync, user_id: UserId, credential: String) -> Self {
        Self {
            app,
            user_id,
            credential,
        }
    }

    /// Returns the authenticated user id for this session.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the user's tasks, completed tasks last.
    pub fn tasks(&self) -> Result<Vec<Task>> {
        Ok(self.app.store().list_tasks(&self.user_id)?)
    }

    /// Creates a task and returns it with its assigned id.
    pub fn add_task(&self, draft: TaskDraft) -> Result<Task> {
        Ok(self.app.store().add_task(&self.user_id, draft)?)
    }

    /// Applies a partial update to a task the user owns.
    pub fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<Task> {
        Ok(self.app.store().update_task(&self.user_id, id, patch)?)
    }

    /// Deletes a task the user owns.
    pub fn delete_task(&self, id: &TaskId) -> Result<()> {
        Ok(self.app.store().delete_task(&self.user_id, id)?)
    }

    /// Runs the fraud-gated share workflow for a task list.
    pub fn share_list(&self, task_list_id: &TaskListId) -> ShareOutcome {
        self.app.issuer().issue(task_list_id, &self.credential)
    }

    /// Like [`SessionHandle::share_list`], collapsed to the string contract
    /// the UI consumes: a link, `"FRAUDULENT"`, or `"ERROR"`.
    pub fn share_list_string(&self, task_list_id: &TaskListId) -> String {
        self.share_list(task_list_id).into_share_string()
    }
}
