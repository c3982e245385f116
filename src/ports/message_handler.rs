//! MessageHandler port - Receiver for inbound authentication messages.

use crate::domain::{AuthMessage, HandlerError};

/// Handler for messages arriving on the authentication channel.
///
/// Implementations should be:
/// - **Quick** - Delivery runs on the socket's dispatch path
/// - **Isolated** - A failure is logged by the transport and never affects
///   other handlers
///
/// Plain closures taking an [`AuthMessage`] implement this trait.
///
/// # Example
///
/// ```ignore
/// struct ChallengeResponder { /* ... */ }
///
/// impl MessageHandler for ChallengeResponder {
///     fn handle(&self, message: AuthMessage) -> Result<(), HandlerError> {
///         let challenge: Challenge = message.payload_as()?;
///         // Answer the challenge...
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "ChallengeResponder"
///     }
/// }
/// ```
pub trait MessageHandler: Send + Sync {
    /// Process one inbound message.
    fn handle(&self, message: AuthMessage) -> Result<(), HandlerError>;

    /// Handler name for logging.
    fn name(&self) -> &str {
        "anonymous"
    }
}

impl<F> MessageHandler for F
where
    F: Fn(AuthMessage) + Send + Sync,
{
    fn handle(&self, message: AuthMessage) -> Result<(), HandlerError> {
        self(message);
        Ok(())
    }
}
