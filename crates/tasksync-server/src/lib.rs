//! # tasksync-server: `TaskSync` server daemon
//!
//! This crate provides the TCP server that exposes `TaskSync` over the
//! network using the binary wire protocol defined in `tasksync-wire`.
//!
//! ## Architecture
//!
//! The server uses `mio` for non-blocking I/O with a poll-based event loop.
//! This follows the project's design principle of explicit control flow
//! without async runtimes.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       tasksync-server                        │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────────┐  │
//! │  │  Listener   │ → │ Connections │ → │   RequestHandler   │  │
//! │  │  (TCP)      │   │ (mio poll)  │   │ (store/auth/share) │  │
//! │  └─────────────┘   └─────────────┘   └────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use tasksync_server::{RequestHandler, Server, ServerConfig};
//!
//! let handler = RequestHandler::new(store, identity, issuer);
//! let config = ServerConfig::new("127.0.0.1:7450".parse()?);
//! let mut server = Server::new(config, handler)?;
//! server.run()?;
//! ```

mod config;
mod connection;
mod error;
mod handler;
pub mod health;
pub mod metrics;
mod server;
#[cfg(test)]
mod tests;

pub use config::{RateLimitConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use health::{HealthChecker, HealthResponse, HealthStatus};
pub use server::Server;
