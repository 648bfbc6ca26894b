//! Slack adapters - Outbound message delivery.

mod mock_sender;
mod web_api_sender;

pub use mock_sender::{MockMessageSender, SentMessage};
pub use web_api_sender::{SlackWebApiConfig, SlackWebApiSender};
