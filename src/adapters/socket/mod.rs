//! Event socket adapters.
//!
//! - `InMemoryEventSocket` - Synchronous, in-process socket with optional
//!   peer pairing for loopback exchanges

mod error;
mod in_memory;

pub use error::SocketError;
pub use in_memory::InMemoryEventSocket;
