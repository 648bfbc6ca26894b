//! Slack HTTP adapter - Slash command webhook.

mod dto;
mod handlers;
mod routes;

pub use dto::{CommandAck, ResponseType, SlashCommandForm};
pub use handlers::{handle_slash_command, health, SlackAppState};
pub use routes::slack_router;
