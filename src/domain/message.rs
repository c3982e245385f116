//! Authentication message value carried over the event socket.
//!
//! The transport treats messages as opaque: it never reads, rewrites or
//! re-encodes their fields. Request/response semantics belong to the caller.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Event name used for both outbound and inbound authentication traffic.
pub const AUTH_MESSAGE_EVENT: &str = "authMessage";

/// An opaque, caller-defined authentication message.
///
/// Serializes exactly as the wrapped JSON value, so the socket sees the
/// caller's structure unchanged.
///
/// # Example
///
/// ```
/// use auth_socket_transport::domain::AuthMessage;
/// use serde_json::json;
///
/// let message = AuthMessage::new(json!({"type": "test", "payload": [1, 2, 3]}));
/// assert_eq!(message.as_value()["type"], "test");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthMessage(JsonValue);

impl AuthMessage {
    /// Wraps a JSON value as a message.
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Builds a message from any serializable caller type.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self)
    }

    /// Deserializes the message into a caller type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.clone())
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_value(self) -> JsonValue {
        self.0
    }
}

impl From<JsonValue> for AuthMessage {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

impl From<AuthMessage> for JsonValue {
    fn from(message: AuthMessage) -> Self {
        message.0
    }
}
