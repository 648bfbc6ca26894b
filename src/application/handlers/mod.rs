//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod genie;

pub use genie::{
    AskGenieError, AskGenieHandler, ConversationPoller, PollConfig, QueryDispatcher,
    SubmitQueryCommand,
};
