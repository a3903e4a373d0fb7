//! # TaskSync
//!
//! Task tracking with fraud-gated sharing.
//!
//! TaskSync keeps per-user task boards (To Do / In Progress / Completed)
//! and generates shareable invite links, with every share request passing
//! through a fraud assessment step before a link is synthesized.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         TaskSync                            │
//! │  ┌──────────┐   ┌───────────┐   ┌─────────┐   ┌──────────┐ │
//! │  │ Identity │ → │  Session  │ → │  Store  │   │  Issuer  │ │
//! │  │  (JWT)   │   │  (scope)  │   │ (CRUD)  │   │ (gated)  │ │
//! │  └──────────┘   └───────────┘   └─────────┘   └──────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use tasksync::{TaskSync, TaskSyncConfig, TaskDraft, TaskListId};
//!
//! let app = TaskSync::new(TaskSyncConfig::new(jwt_secret));
//!
//! // Resolve a session from a sign-in credential
//! let session = app.session(id_token)?;
//!
//! // Task CRUD, scoped to the session's user
//! let task = session.add_task(TaskDraft::new("Review the proposal"))?;
//!
//! // Fraud-gated share link (a link, "FRAUDULENT", or "ERROR")
//! let share = session.share_list_string(&TaskListId::default_list());
//! ```
//!
//! # Modules
//!
//! - **SDK Layer**: [`TaskSync`], [`SessionHandle`] - Main API
//! - **Collaborators**: identity, store, fraud assessment, link issuance

mod app;
mod error;
mod session;


// SDK Layer - Main API
pub use app::{TaskSync, TaskSyncConfig};
pub use error::{Result, TaskSyncError};
pub use session::SessionHandle;

// Re-export core types from tasksync-types
pub use tasksync_types::{
    FraudVerdict, ShareOutcome, ShareRequest, Task, TaskDraft, TaskId, TaskListId, TaskPatch,
    TaskStatus, UserId, DEFAULT_TASK_LIST, ERROR_SENTINEL, FRAUDULENT_SENTINEL,
};

// Re-export the collaborator seams
pub use tasksync_auth::{AuthError, IdentityProvider, JwtConfig, SessionVerifier};
pub use tasksync_fraud::{
    AssessmentError, FraudChecker, RequestFacts, SampledChecker, VelocityChecker,
};
pub use tasksync_sharing::{IssueError, LinkIssuer, LinkToken, ShareLinkConfig};
pub use tasksync_store::{MemoryTaskStore, StoreError, TaskStore};
