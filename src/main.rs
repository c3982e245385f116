//! Loopback demo: a client and a server transport over paired in-memory sockets.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{error, info};

use auth_socket_transport::adapters::{InMemoryEventSocket, SocketClientTransport};
use auth_socket_transport::config::AppConfig;
use auth_socket_transport::domain::{AuthMessage, HandlerError};
use auth_socket_transport::ports::{ClientTransport, MessageHandler};
use auth_socket_transport::telemetry::init_tracing;

/// Answers every login request with a challenge on the same channel.
struct ChallengeIssuer {
    replies: mpsc::UnboundedSender<AuthMessage>,
}

impl MessageHandler for ChallengeIssuer {
    fn handle(&self, message: AuthMessage) -> Result<(), HandlerError> {
        let username = message
            .as_value()
            .get("username")
            .and_then(|v| v.as_str())
            .ok_or_else(|| HandlerError::rejected("missing username"))?;
        let challenge = AuthMessage::new(json!({
            "type": "challenge",
            "username": username,
            "nonce": 42,
        }));
        self.replies
            .send(challenge)
            .map_err(|e| HandlerError::rejected(e.to_string()))
    }

    fn name(&self) -> &str {
        "ChallengeIssuer"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.telemetry)?;

    let (client_socket, server_socket) = InMemoryEventSocket::pair();
    let client = SocketClientTransport::new(Arc::new(client_socket))?;
    let server = SocketClientTransport::new(Arc::new(server_socket))?;

    // Replies leave the server outside the socket's dispatch path.
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    server
        .on_data(Arc::new(ChallengeIssuer { replies: reply_tx }))
        .await?;

    let (received_tx, mut received_rx) = mpsc::unbounded_channel();
    client
        .on_data(Arc::new(move |message: AuthMessage| {
            if received_tx.send(message).is_err() {
                error!("client receiver dropped");
            }
        }))
        .await?;

    client
        .send(AuthMessage::new(json!({"type": "login", "username": "ada"})))
        .await?;

    if let Some(reply) = reply_rx.recv().await {
        server.send(reply).await?;
    }
    if let Some(challenge) = received_rx.recv().await {
        info!(payload = %challenge.as_value(), "client received challenge");
    }

    Ok(())
}
