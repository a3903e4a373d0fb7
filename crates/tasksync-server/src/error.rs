//! Server error types.

use tasksync_auth::AuthError;
use tasksync_store::StoreError;
use tasksync_wire::WireError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur during server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Wire protocol error.
    #[error("wire protocol error: {0}")]
    Wire(#[from] WireError),

    /// Task store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Maximum connections reached.
    #[error("maximum connections reached: {0}")]
    MaxConnectionsReached(usize),

    /// Bind failed.
    #[error("failed to bind to {addr}: {source}")]
    BindFailed {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    /// Server shutdown.
    #[error("server shutdown")]
    Shutdown,
}
