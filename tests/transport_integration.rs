//! Integration tests for the socket client transport.
//!
//! These tests drive the public API end to end:
//! 1. A client transport sends over one end of a paired in-memory socket
//! 2. A transport on the other end receives through its registered handlers
//! 3. Messages arrive unchanged, in order, at every handler
//!
//! Property tests cover arbitrary JSON payloads, including empty and deeply
//! nested values.

use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use proptest::prelude::*;
use serde_json::{json, Value as JsonValue};

use auth_socket_transport::adapters::{InMemoryEventSocket, SocketClientTransport, SocketError};
use auth_socket_transport::domain::{AuthMessage, HandlerError, AUTH_MESSAGE_EVENT};
use auth_socket_transport::ports::{ClientTransport, MessageHandler};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Handler that keeps every message it sees.
#[derive(Default)]
struct Inbox {
    messages: Mutex<Vec<AuthMessage>>,
}

impl Inbox {
    fn messages(&self) -> Vec<AuthMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl MessageHandler for Inbox {
    fn handle(&self, message: AuthMessage) -> Result<(), HandlerError> {
        self.messages.lock().unwrap().push(message);
        Ok(())
    }

    fn name(&self) -> &str {
        "Inbox"
    }
}

/// Handler that only accepts messages carrying a `type` string.
struct TypedOnly;

impl MessageHandler for TypedOnly {
    fn handle(&self, message: AuthMessage) -> Result<(), HandlerError> {
        match message.as_value().get("type") {
            Some(JsonValue::String(_)) => Ok(()),
            _ => Err(HandlerError::rejected("message has no type")),
        }
    }

    fn name(&self) -> &str {
        "TypedOnly"
    }
}

struct Connection {
    client: SocketClientTransport<InMemoryEventSocket>,
    server: SocketClientTransport<InMemoryEventSocket>,
}

fn connect() -> Connection {
    let (client_socket, server_socket) = InMemoryEventSocket::pair();
    Connection {
        client: SocketClientTransport::new(Arc::new(client_socket)).unwrap(),
        server: SocketClientTransport::new(Arc::new(server_socket)).unwrap(),
    }
}

fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::from),
        any::<i64>().prop_map(JsonValue::from),
        "[a-zA-Z0-9 _-]{0,16}".prop_map(JsonValue::from),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|fields| JsonValue::Object(fields.into_iter().collect())),
        ]
    })
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn send_emits_on_auth_message_channel() {
    let socket = Arc::new(InMemoryEventSocket::new());
    let transport = SocketClientTransport::new(Arc::clone(&socket)).unwrap();
    let message = AuthMessage::new(json!({"type": "test", "payload": [1, 2, 3]}));

    transport.send(message.clone()).await.unwrap();

    assert_eq!(socket.emitted(), vec![(AUTH_MESSAGE_EVENT.to_string(), message)]);
}

#[tokio::test]
async fn registered_callback_receives_fired_message() {
    let socket = Arc::new(InMemoryEventSocket::new());
    let transport = SocketClientTransport::new(Arc::clone(&socket)).unwrap();
    let inbox = Arc::new(Inbox::default());
    let message = AuthMessage::new(json!({"type": "test", "payload": [4, 5, 6]}));

    transport.on_data(inbox.clone()).await.unwrap();
    socket.fire(AUTH_MESSAGE_EVENT, message.clone()).unwrap();

    assert_eq!(inbox.messages(), vec![message]);
}

#[tokio::test]
async fn construction_and_registration_share_one_channel() {
    let socket = Arc::new(InMemoryEventSocket::new());
    let transport = SocketClientTransport::new(Arc::clone(&socket)).unwrap();
    assert_eq!(socket.listener_count(AUTH_MESSAGE_EVENT), 1);

    transport.on_data(Arc::new(Inbox::default())).await.unwrap();
    transport.on_data(Arc::new(Inbox::default())).await.unwrap();

    assert_eq!(socket.listener_count(AUTH_MESSAGE_EVENT), 3);
}

#[tokio::test]
async fn request_and_reply_travel_on_the_same_channel() {
    let conn = connect();
    let server_inbox = Arc::new(Inbox::default());
    let client_inbox = Arc::new(Inbox::default());
    conn.server.on_data(server_inbox.clone()).await.unwrap();
    conn.client.on_data(client_inbox.clone()).await.unwrap();

    let request = AuthMessage::new(json!({"type": "login", "username": "ada"}));
    conn.client.send(request.clone()).await.unwrap();
    let reply = AuthMessage::new(json!({"type": "challenge", "nonce": 42}));
    conn.server.send(reply.clone()).await.unwrap();

    assert_eq!(server_inbox.messages(), vec![request]);
    assert_eq!(client_inbox.messages(), vec![reply]);
}

#[tokio::test]
async fn fan_out_survives_a_rejecting_handler() {
    let conn = connect();
    let first = Arc::new(Inbox::default());
    let second = Arc::new(Inbox::default());
    conn.server.on_data(first.clone()).await.unwrap();
    conn.server.on_data(Arc::new(TypedOnly)).await.unwrap();
    conn.server.on_data(second.clone()).await.unwrap();

    let untyped = AuthMessage::new(json!({"payload": []}));
    conn.client.send(untyped.clone()).await.unwrap();

    assert_eq!(first.messages(), vec![untyped.clone()]);
    assert_eq!(second.messages(), vec![untyped]);
}

#[tokio::test]
async fn send_after_peer_dropped_returns_socket_error() {
    let (client_socket, server_socket) = InMemoryEventSocket::pair();
    let client = SocketClientTransport::new(Arc::new(client_socket)).unwrap();
    drop(server_socket);

    let result = client.send(AuthMessage::new(json!({"type": "login"}))).await;

    assert_eq!(result, Err(SocketError::Disconnected));
}

#[tokio::test]
async fn usable_through_the_port_trait_object() {
    let socket = Arc::new(InMemoryEventSocket::new());
    let transport: Arc<dyn ClientTransport<Error = SocketError>> =
        Arc::new(SocketClientTransport::new(Arc::clone(&socket)).unwrap());

    transport.send(AuthMessage::new(json!({"type": "logout"}))).await.unwrap();

    assert_eq!(socket.emitted_on(AUTH_MESSAGE_EVENT).len(), 1);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn send_passes_any_message_through_unchanged(value in arb_json()) {
        let socket = Arc::new(InMemoryEventSocket::new());
        let transport = SocketClientTransport::new(Arc::clone(&socket)).unwrap();

        block_on(transport.send(AuthMessage::new(value.clone()))).unwrap();

        let emitted = socket.emitted();
        prop_assert_eq!(emitted.len(), 1);
        prop_assert_eq!(emitted[0].0.as_str(), AUTH_MESSAGE_EVENT);
        prop_assert_eq!(emitted[0].1.as_value(), &value);
    }

    #[test]
    fn round_trip_yields_deep_equal_message(value in arb_json()) {
        let conn = connect();
        let inbox = Arc::new(Inbox::default());
        block_on(conn.server.on_data(inbox.clone())).unwrap();

        block_on(conn.client.send(AuthMessage::new(value.clone()))).unwrap();

        let received = inbox.messages();
        prop_assert_eq!(received.len(), 1);
        prop_assert_eq!(received[0].clone().into_value(), value);
    }

    #[test]
    fn every_handler_sees_messages_in_send_order(
        values in prop::collection::vec(arb_json(), 1..8),
        handlers in 1usize..4,
    ) {
        let conn = connect();
        let inboxes: Vec<Arc<Inbox>> = (0..handlers).map(|_| Arc::new(Inbox::default())).collect();
        for inbox in &inboxes {
            block_on(conn.server.on_data(inbox.clone())).unwrap();
        }

        for value in &values {
            block_on(conn.client.send(AuthMessage::new(value.clone()))).unwrap();
        }

        let expected: Vec<AuthMessage> = values.into_iter().map(AuthMessage::new).collect();
        for inbox in &inboxes {
            prop_assert_eq!(inbox.messages(), expected.clone());
        }
    }
}
