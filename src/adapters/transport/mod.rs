//! Client transport adapters.

mod socket_client;

pub use socket_client::SocketClientTransport;
