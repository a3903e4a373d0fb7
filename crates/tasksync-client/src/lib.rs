//! # tasksync-client: RPC client for `TaskSync`
//!
//! Synchronous client for the `TaskSync` wire protocol: task CRUD plus
//! share-link requests, one method per operation.

mod client;
mod error;

pub use client::{Client, ClientConfig};
pub use error::{ClientError, ClientResult};
