//! Remote message states reported by Genie while an answer is computed.

use std::fmt;

/// Remote statuses that mean Genie is still working on the answer.
///
/// They are distinct to Genie (queued, filtering context, waiting for a
/// warehouse, executing SQL, reasoning) but all lead to another poll here.
const RUNNING_STATUSES: &[&str] = &[
    "IN_PROGRESS",
    "SUBMITTED",
    "FETCHING_METADATA",
    "FILTERING_CONTEXT",
    "ASKING_AI",
    "PENDING_WAREHOUSE",
    "EXECUTING_QUERY",
];

/// Fallback when a failed message carries no error text.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Reference to a queryable result set attached to a completed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    attachment_id: String,
}

impl Attachment {
    pub fn new(attachment_id: impl Into<String>) -> Self {
        Self {
            attachment_id: attachment_id.into(),
        }
    }

    pub fn attachment_id(&self) -> &str {
        &self.attachment_id
    }
}

/// State of a Genie message as observed by one status fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageState {
    /// Accepted but not yet picked up.
    Pending,
    /// Any intermediate processing stage.
    Running,
    /// Answer is ready, either as text or as query attachments.
    Completed {
        content: Option<String>,
        attachments: Vec<Attachment>,
    },
    /// Genie gave up on the question.
    Failed { error_message: String },
    /// The message was cancelled remotely.
    Cancelled,
    /// A status this service does not recognise.
    Unknown { raw: String },
}

impl MessageState {
    /// Builds a state from the fields of a Genie message response.
    ///
    /// A missing status is reported as `Unknown` with an empty raw value.
    pub fn from_remote(
        status: Option<&str>,
        content: Option<String>,
        attachments: Vec<Attachment>,
        error_message: Option<String>,
    ) -> Self {
        let Some(status) = status else {
            return MessageState::Unknown { raw: String::new() };
        };

        match status {
            "COMPLETED" => MessageState::Completed {
                content,
                attachments,
            },
            "FAILED" => MessageState::Failed {
                error_message: error_message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            },
            "CANCELLED" => MessageState::Cancelled,
            "PENDING" => MessageState::Pending,
            s if RUNNING_STATUSES.contains(&s) => MessageState::Running,
            other => MessageState::Unknown {
                raw: other.to_string(),
            },
        }
    }
}

/// The states that end a poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalMessage {
    Completed {
        content: Option<String>,
        attachments: Vec<Attachment>,
    },
    Failed {
        error_message: String,
    },
    Cancelled,
    /// Unrecognised status, treated as terminal so polling cannot spin forever.
    Unknown {
        raw: String,
    },
}

impl TerminalMessage {
    /// Status label as Genie spells it.
    pub fn status_label(&self) -> &str {
        match self {
            TerminalMessage::Completed { .. } => "COMPLETED",
            TerminalMessage::Failed { .. } => "FAILED",
            TerminalMessage::Cancelled => "CANCELLED",
            TerminalMessage::Unknown { raw } if raw.is_empty() => "<none>",
            TerminalMessage::Unknown { raw } => raw,
        }
    }

    /// First attachment of a completed message; later ones are ignored.
    pub fn first_attachment(&self) -> Option<&Attachment> {
        match self {
            TerminalMessage::Completed { attachments, .. } => attachments.first(),
            _ => None,
        }
    }
}

impl TryFrom<MessageState> for TerminalMessage {
    type Error = MessageState;

    /// Converts a terminal state; in-progress states are handed back unchanged.
    fn try_from(state: MessageState) -> Result<Self, Self::Error> {
        match state {
            MessageState::Completed {
                content,
                attachments,
            } => Ok(TerminalMessage::Completed {
                content,
                attachments,
            }),
            MessageState::Failed { error_message } => {
                Ok(TerminalMessage::Failed { error_message })
            }
            MessageState::Cancelled => Ok(TerminalMessage::Cancelled),
            MessageState::Unknown { raw } => Ok(TerminalMessage::Unknown { raw }),
            in_progress @ (MessageState::Pending | MessageState::Running) => Err(in_progress),
        }
    }
}

impl fmt::Display for TerminalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_label())
    }
}
