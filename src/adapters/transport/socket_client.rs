//! Client transport over a bidirectional event socket.
//!
//! Bridges the application's message channel onto the single
//! [`AUTH_MESSAGE_EVENT`] event of an injected [`EventSocket`]:
//!
//! ```text
//! application ──send──▶ SocketClientTransport ──emit("authMessage")──▶ socket
//! application ◀─handler── SocketClientTransport ◀─on("authMessage")─── socket
//! ```
//!
//! The transport holds nothing but the socket. Messages pass through
//! untouched in both directions and socket errors are returned as-is.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::domain::{AuthMessage, AUTH_MESSAGE_EVENT};
use crate::ports::{ClientTransport, EventSocket, MessageHandler, SocketListener};

/// Sends and receives authentication messages over an event socket.
///
/// Construction subscribes an internal listener to [`AUTH_MESSAGE_EVENT`].
/// That subscription, and every one added by [`on_data`](ClientTransport::on_data),
/// lasts as long as the socket; there is no unsubscribe. Wrapping the same
/// socket twice produces two independent subscriptions.
///
/// # Example
///
/// ```ignore
/// let socket = Arc::new(InMemoryEventSocket::new());
/// let transport = SocketClientTransport::new(Arc::clone(&socket))?;
///
/// transport.send(AuthMessage::new(json!({"type": "login"}))).await?;
/// assert_eq!(socket.emit_count(), 1);
/// ```
pub struct SocketClientTransport<S: EventSocket> {
    socket: Arc<S>,
}

impl<S: EventSocket> SocketClientTransport<S> {
    /// Wraps `socket` and subscribes to the authentication channel.
    ///
    /// # Errors
    ///
    /// Returns the socket's error unmodified if the subscription fails.
    pub fn new(socket: Arc<S>) -> Result<Self, S::Error> {
        socket.on(AUTH_MESSAGE_EVENT, Arc::new(dispatch))?;
        debug!(event = AUTH_MESSAGE_EVENT, "client transport subscribed");
        Ok(Self { socket })
    }

    /// Returns the wrapped socket.
    pub fn socket(&self) -> &Arc<S> {
        &self.socket
    }
}

impl<S: EventSocket> Clone for SocketClientTransport<S> {
    fn clone(&self) -> Self {
        Self {
            socket: Arc::clone(&self.socket),
        }
    }
}

#[async_trait]
impl<S: EventSocket + 'static> ClientTransport for SocketClientTransport<S> {
    type Error = S::Error;

    async fn send(&self, message: AuthMessage) -> Result<(), S::Error> {
        trace!(event = AUTH_MESSAGE_EVENT, "sending auth message");
        self.socket.emit(AUTH_MESSAGE_EVENT, message)
    }

    async fn on_data(&self, handler: Arc<dyn MessageHandler>) -> Result<(), S::Error> {
        let name = handler.name().to_string();
        self.socket.on(AUTH_MESSAGE_EVENT, forward_to(handler))?;
        debug!(event = AUTH_MESSAGE_EVENT, handler = %name, "auth message handler registered");
        Ok(())
    }
}

/// Listener installed at construction.
fn dispatch(_: AuthMessage) {
    trace!(event = AUTH_MESSAGE_EVENT, "auth message received");
}

/// Wraps a handler so its failures stay contained.
///
/// The socket may invoke several listeners from one dispatch loop; an error
/// or panic here must not cut that loop short.
fn forward_to(handler: Arc<dyn MessageHandler>) -> SocketListener {
    Arc::new(move |message: AuthMessage| {
        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(message))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(handler = handler.name(), error = %e, "auth message handler failed");
            }
            Err(_) => {
                warn!(handler = handler.name(), "auth message handler panicked");
            }
        }
    })
}
