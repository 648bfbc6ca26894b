//! Message Sender Port - Outbound delivery of answers to a chat channel.

use async_trait::async_trait;
use thiserror::Error;

/// Port for posting text messages to a chat destination.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Posts `text` to `channel`.
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), DeliveryError>;
}

/// Errors raised while delivering a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Connection failure or timeout.
    #[error("chat service unreachable: {0}")]
    Unreachable(String),

    /// Non-success HTTP status.
    #[error("chat service returned status {status}")]
    Rejected { status: u16 },

    /// The chat API accepted the request but reported an error.
    #[error("chat API error: {0}")]
    Api(String),
}

impl DeliveryError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable(message.into())
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }
}
