//! Auth Socket Transport - authentication messages over an event socket
//!
//! This crate lets an application exchange authentication messages with a
//! remote peer over an existing bidirectional event socket, without knowing
//! the socket API or the event name used on the wire.
//!
//! ```ignore
//! let transport = SocketClientTransport::new(socket)?;
//! transport.on_data(Arc::new(|reply: AuthMessage| handle(reply))).await?;
//! transport.send(AuthMessage::new(json!({"type": "login"}))).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
