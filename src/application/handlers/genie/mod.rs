//! Genie question handlers.
//!
//! - `poll_conversation` - Status polling with a fixed attempt budget
//! - `ask_genie` - Start, poll and format one question
//! - `dispatch_query` - Background execution and answer delivery

mod ask_genie;
mod dispatch_query;
mod poll_conversation;

pub use ask_genie::{AskGenieError, AskGenieHandler};
pub use dispatch_query::{QueryDispatcher, SubmitQueryCommand};
pub use poll_conversation::{ConversationPoller, PollConfig};
