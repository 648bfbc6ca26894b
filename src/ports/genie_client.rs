//! Genie Client Port - Interface to the Genie conversation API.
//!
//! The three operations a question needs: start a conversation, check the
//! status of its message, and fetch the tabular result of an attachment.
//! Implementations are stateless apart from their fixed space identity and
//! credential, so one instance is shared by every concurrent query.

use async_trait::async_trait;

use crate::domain::genie::{ClientError, ConversationHandle, MessageState, QueryResult};

/// Port for the remote Genie conversation service.
#[async_trait]
pub trait GenieClient: Send + Sync {
    /// Starts a new conversation whose first message is `question`.
    ///
    /// # Errors
    ///
    /// - `Unreachable` on transport failure or timeout
    /// - `Malformed` if the response lacks a conversation or message id
    async fn start_conversation(&self, question: &str) -> Result<ConversationHandle, ClientError>;

    /// Fetches the current state of the handle's message.
    ///
    /// Unrecognised remote statuses come back as `MessageState::Unknown`.
    async fn fetch_status(&self, handle: &ConversationHandle) -> Result<MessageState, ClientError>;

    /// Fetches the query result behind an attachment of the handle's message.
    async fn fetch_attachment_result(
        &self,
        handle: &ConversationHandle,
        attachment_id: &str,
    ) -> Result<QueryResult, ClientError>;
}
