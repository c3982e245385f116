//! Socket-layer error types.

use thiserror::Error;

/// Errors from the in-memory event socket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocketError {
    /// The socket was closed locally.
    #[error("socket closed")]
    Closed,
    /// The paired peer socket no longer exists.
    #[error("peer disconnected")]
    Disconnected,
    /// Listener registry could not be accessed.
    #[error("listener registry error: {0}")]
    Listener(String),
}
