//! HTTP DTOs for the Slack slash command endpoint.

use serde::{Deserialize, Serialize};

/// Form payload Slack posts for a slash command.
///
/// Slack sends many more fields (`team_id`, `response_url`, `trigger_id`...);
/// only the ones used here are read.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommandForm {
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub channel_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Visibility of a command reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Visible to everyone in the channel.
    InChannel,
    /// Visible only to the user who ran the command.
    Ephemeral,
}

/// Immediate reply to a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAck {
    pub response_type: ResponseType,
    pub text: String,
}

impl CommandAck {
    /// Acknowledges an accepted question.
    pub fn processing(question: &str) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: format!("Processing your query: {}...", question),
        }
    }

    /// Tells the caller how to use the command.
    pub fn usage(command: &str) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: format!(
                "Ask a question about your data, for example: `{} top 10 customers by revenue`",
                command
            ),
        }
    }
}
