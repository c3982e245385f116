//! Error types for inbound message handling.

use thiserror::Error;

/// Failure reported by a [`MessageHandler`](crate::ports::MessageHandler).
///
/// Handler failures never reach the socket or other handlers; the transport
/// logs them and moves on.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Handler rejected message: {0}")]
    Rejected(String),

    #[error("Message payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HandlerError {
    /// Creates a rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        HandlerError::Rejected(reason.into())
    }
}
