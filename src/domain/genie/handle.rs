//! Conversation handle issued by Genie when a conversation starts.

use std::fmt;

/// Identifies the remote conversation and the message carrying the question.
///
/// Created once from a successful start call and owned by a single query
/// invocation; it is never reused for a follow-up question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationHandle {
    conversation_id: String,
    message_id: String,
}

impl ConversationHandle {
    /// Creates a handle from the identifiers returned by Genie.
    pub fn new(conversation_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            message_id: message_id.into(),
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

impl fmt::Display for ConversationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.conversation_id, self.message_id)
    }
}
