//! EventSocket port - The capability set of a bidirectional event socket.
//!
//! Any transport that can emit a named event and register persistent
//! listeners for one can sit behind the client transport: a real socket
//! client, an in-memory double, or another protocol entirely.

use std::sync::Arc;

use crate::domain::AuthMessage;

/// Persistent listener registered for a named event.
pub type SocketListener = Arc<dyn Fn(AuthMessage) + Send + Sync>;

/// Port for a connected, bidirectional event socket.
///
/// Implementations must ensure:
/// - `emit` is fire-and-forget; returning `Ok` means the emit was issued
/// - `on` may be called many times for the same event, and every listener
///   stays registered for the lifetime of the socket
/// - listeners for one event are invoked in the order events are delivered
///
/// Connection management, reconnection and framing all live behind this
/// trait and are invisible to callers.
pub trait EventSocket: Send + Sync {
    /// Error raised by the socket's own emit/subscribe machinery.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Dispatch `data` under the event name `event`.
    fn emit(&self, event: &str, data: AuthMessage) -> Result<(), Self::Error>;

    /// Register a persistent listener for `event`.
    fn on(&self, event: &str, listener: SocketListener) -> Result<(), Self::Error>;
}
