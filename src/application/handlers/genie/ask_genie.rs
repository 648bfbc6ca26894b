//! AskGenie handler.
//!
//! Runs one question through its whole lifecycle: start a conversation, poll
//! the message to a terminal state, then format the answer. Every failure is
//! logged and folded into an apology string, so callers always have
//! something to post back.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::genie::{format_terminal_message, ClientError, PollError};
use crate::ports::GenieClient;

use super::poll_conversation::ConversationPoller;

/// Prefix of every failure answer.
const APOLOGY: &str = "Sorry, there was an error processing your request";

/// Reasons a question ended without a formatted answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskGenieError {
    /// The conversation could not be started.
    #[error("failed to start conversation: {0}")]
    Start(#[source] ClientError),

    /// Polling ended without a terminal message.
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl AskGenieError {
    /// Human-readable reason for the chat answer.
    pub fn reason(&self) -> String {
        match self {
            AskGenieError::Start(error @ ClientError::Malformed(_)) => {
                format!("Invalid response from Genie API ({})", error)
            }
            AskGenieError::Start(error) => {
                format!("Could not start conversation with Genie ({})", error)
            }
            AskGenieError::Poll(PollError::Timeout { attempts }) => {
                format!("Timed out waiting for Genie response after {} attempts", attempts)
            }
            AskGenieError::Poll(PollError::Exhausted { attempts, source }) => {
                format!("Failed to get response after {} attempts ({})", attempts, source)
            }
            AskGenieError::Poll(PollError::Rejected(source)) => {
                format!("Genie status check failed ({})", source)
            }
        }
    }

    /// The full answer posted to the user.
    pub fn user_message(&self) -> String {
        format!("{}: {}", APOLOGY, self.reason())
    }
}

/// Handler that answers a natural-language question with Genie.
pub struct AskGenieHandler {
    client: Arc<dyn GenieClient>,
    poller: ConversationPoller,
}

impl AskGenieHandler {
    pub fn new(client: Arc<dyn GenieClient>, poller: ConversationPoller) -> Self {
        Self { client, poller }
    }

    /// Answers `question`. Never fails; errors become an apology string.
    pub async fn handle(&self, question: &str) -> String {
        match self.try_handle(question).await {
            Ok(answer) => answer,
            Err(error) => {
                tracing::error!(error = %error, "Genie question failed");
                error.user_message()
            }
        }
    }

    async fn try_handle(&self, question: &str) -> Result<String, AskGenieError> {
        let handle = self
            .client
            .start_conversation(question)
            .await
            .map_err(AskGenieError::Start)?;

        let terminal = self.poller.poll(&handle).await?;

        let client = Arc::clone(&self.client);
        let answer = format_terminal_message(terminal, |attachment_id| async move {
            let result = client.fetch_attachment_result(&handle, &attachment_id).await;
            if let Err(error) = &result {
                tracing::warn!(
                    conversation_id = handle.conversation_id(),
                    message_id = handle.message_id(),
                    attachment_id = %attachment_id,
                    error = %error,
                    "Failed to fetch query result"
                );
            }
            result
        })
        .await;

        Ok(answer)
    }
}
