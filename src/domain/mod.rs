//! Domain layer containing the transported message type and its errors.
//!
//! # Module Organization
//!
//! - `message` - The opaque authentication message value and channel name
//! - `errors` - Failures raised by inbound message handlers

mod errors;
mod message;

pub use errors::HandlerError;
pub use message::{AuthMessage, AUTH_MESSAGE_EVENT};
