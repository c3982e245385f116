//! ClientTransport port - How the application sends and receives
//! authentication messages without knowing the socket underneath.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::AuthMessage;

use super::MessageHandler;

/// Port for exchanging authentication messages with a remote peer.
///
/// Both operations resolve once the underlying action has been *issued*.
/// Resolution says nothing about delivery to, or acknowledgement by, the
/// remote peer.
///
/// # Example
///
/// ```ignore
/// transport.on_data(Arc::new(|message: AuthMessage| println!("{message:?}"))).await?;
/// transport.send(AuthMessage::new(json!({"type": "login"}))).await?;
/// ```
#[async_trait]
pub trait ClientTransport: Send + Sync {
    /// Error surfaced from the underlying transport, unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one message to the peer.
    async fn send(&self, message: AuthMessage) -> Result<(), Self::Error>;

    /// Register a handler for every message received after this call.
    ///
    /// Handlers accumulate: each registered handler sees every message.
    async fn on_data(&self, handler: Arc<dyn MessageHandler>) -> Result<(), Self::Error>;
}
