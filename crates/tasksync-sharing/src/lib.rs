//! # tasksync-sharing: Fraud-gated share links
//!
//! The core of the invite workflow: the [`LinkIssuer`] runs each share
//! request through authenticate → assess → branch, and either synthesizes
//! a unique, non-guessable link or rejects the request.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tasksync_sharing::{LinkIssuer, ShareLinkConfig};
//! use tasksync_fraud::VelocityChecker;
//!
//! let issuer = LinkIssuer::new(
//!     identity_provider,
//!     Arc::new(VelocityChecker::per_minute(5)),
//!     ShareLinkConfig::default(),
//! );
//!
//! let outcome = issuer.issue(&"default-list".into(), &session_token);
//! let share_string = outcome.into_share_string();
//! ```

mod error;
mod issuer;
mod token;


pub use error::{IssueError, IssueResult};
pub use issuer::{LinkIssuer, ShareLinkConfig};
pub use token::LinkToken;
