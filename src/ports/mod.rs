//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `EventSocket` - Capability set consumed from a bidirectional event socket
//! - `ClientTransport` - Application-facing send/receive surface
//! - `MessageHandler` - Callback that receives inbound messages

mod client_transport;
mod event_socket;
mod message_handler;

pub use client_transport::ClientTransport;
pub use event_socket::{EventSocket, SocketListener};
pub use message_handler::MessageHandler;
