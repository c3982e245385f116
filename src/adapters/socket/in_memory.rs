//! In-memory event socket implementation.
//!
//! Provides synchronous, deterministic event delivery for tests, demos and
//! single-process embedding. Two sockets created with
//! [`InMemoryEventSocket::pair`] behave like both ends of one connection:
//! whatever one side emits is delivered to the other side's listeners.
//!
//! # Panics
//!
//! The inspection helpers (`emitted`, `listener_count`, ...) panic if an
//! internal lock is poisoned. The [`EventSocket`] methods report poisoning as
//! [`SocketError::Listener`] instead.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tracing::trace;

use crate::domain::AuthMessage;
use crate::ports::{EventSocket, SocketListener};

use super::SocketError;

#[derive(Default)]
struct SocketState {
    listeners: RwLock<HashMap<String, Vec<SocketListener>>>,
    emitted: RwLock<Vec<(String, AuthMessage)>>,
    closed: AtomicBool,
}

impl SocketState {
    /// Invokes every listener for `event`, in registration order.
    ///
    /// The listener list is cloned before invocation so listeners may
    /// register further listeners or emit without deadlocking.
    fn deliver(&self, event: &str, data: AuthMessage) -> Result<usize, SocketError> {
        let listeners: Vec<SocketListener> = {
            let listeners = self
                .listeners
                .read()
                .map_err(|e| SocketError::Listener(e.to_string()))?;
            listeners.get(event).cloned().unwrap_or_default()
        };

        trace!(event, listeners = listeners.len(), "delivering event");
        for listener in &listeners {
            listener(data.clone());
        }
        Ok(listeners.len())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// In-process event socket.
///
/// Features:
/// - Any number of listeners per event, invoked in registration order
/// - Emitted-event capture for assertions
/// - Inbound simulation through [`fire`](Self::fire)
/// - Optional peer pairing through [`pair`](Self::pair)
///
/// # Example
///
/// ```ignore
/// let (client, server) = InMemoryEventSocket::pair();
/// server.on("authMessage", Arc::new(|m| println!("{m:?}")))?;
/// client.emit("authMessage", AuthMessage::new(json!({"type": "login"})))?;
/// assert_eq!(client.emit_count(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryEventSocket {
    state: Arc<SocketState>,
    peer: Option<Weak<SocketState>>,
}

impl InMemoryEventSocket {
    /// Creates an unpaired socket. Emits are recorded but go nowhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates two sockets wired to each other.
    pub fn pair() -> (Self, Self) {
        let left = Arc::new(SocketState::default());
        let right = Arc::new(SocketState::default());
        (
            Self {
                state: Arc::clone(&left),
                peer: Some(Arc::downgrade(&right)),
            },
            Self {
                state: right,
                peer: Some(Arc::downgrade(&left)),
            },
        )
    }

    /// Simulates the remote side sending `data` under `event`.
    ///
    /// Returns the number of listeners that were invoked.
    pub fn fire(&self, event: &str, data: AuthMessage) -> Result<usize, SocketError> {
        self.state.deliver(event, data)
    }

    /// Closes the socket. Later `emit`/`on` calls fail with [`SocketError::Closed`].
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    // === Test Helpers ===

    /// Returns every successful emit as `(event, data)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emitted(&self) -> Vec<(String, AuthMessage)> {
        self.state
            .emitted
            .read()
            .expect("InMemoryEventSocket: emitted lock poisoned")
            .clone()
    }

    /// Returns the payloads emitted under a specific event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emitted_on(&self, event: &str) -> Vec<AuthMessage> {
        self.emitted()
            .into_iter()
            .filter(|(name, _)| name == event)
            .map(|(_, data)| data)
            .collect()
    }

    /// Returns count of successful emits.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emit_count(&self) -> usize {
        self.state
            .emitted
            .read()
            .expect("InMemoryEventSocket: emitted lock poisoned")
            .len()
    }

    /// Returns how many listeners are registered for `event`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .listeners
            .read()
            .expect("InMemoryEventSocket: listeners lock poisoned")
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Clears the emitted-event log. Listeners stay registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.state
            .emitted
            .write()
            .expect("InMemoryEventSocket: emitted write lock poisoned")
            .clear();
    }
}

impl EventSocket for InMemoryEventSocket {
    type Error = SocketError;

    fn emit(&self, event: &str, data: AuthMessage) -> Result<(), SocketError> {
        if self.state.is_closed() {
            return Err(SocketError::Closed);
        }

        let peer = match &self.peer {
            Some(weak) => match weak.upgrade() {
                Some(peer) if !peer.is_closed() => Some(peer),
                _ => return Err(SocketError::Disconnected),
            },
            None => None,
        };

        self.state
            .emitted
            .write()
            .map_err(|e| SocketError::Listener(e.to_string()))?
            .push((event.to_string(), data.clone()));

        if let Some(peer) = peer {
            peer.deliver(event, data)?;
        }
        Ok(())
    }

    fn on(&self, event: &str, listener: SocketListener) -> Result<(), SocketError> {
        if self.state.is_closed() {
            return Err(SocketError::Closed);
        }

        self.state
            .listeners
            .write()
            .map_err(|e| SocketError::Listener(e.to_string()))?
            .entry(event.to_string())
            .or_default()
            .push(listener);
        Ok(())
    }
}
