//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `transport` - Client transport over an event socket
//! - `socket` - Event socket implementations (in-memory)

pub mod socket;
pub mod transport;

pub use socket::{InMemoryEventSocket, SocketError};
pub use transport::SocketClientTransport;
