//! Genie conversation domain module.
//!
//! Types describing one question's lifecycle in a Genie space, plus the pure
//! rendering of a finished answer for chat display.
//!
//! # Module Structure
//!
//! - `handle` - Conversation/message identity returned by a start call
//! - `message` - Remote message states and the terminal subset
//! - `query_result` - Tabular result of a query attachment
//! - `errors` - Client and polling errors
//! - `formatter` - Terminal message to display string

mod errors;
mod formatter;
mod handle;
mod message;
mod query_result;

pub use errors::{ClientError, PollError};
pub use formatter::{
    display_value, format_terminal_message, render_query_result, COLUMN_DELIMITER,
    MAX_DISPLAY_ROWS,
};
pub use handle::ConversationHandle;
pub use message::{Attachment, MessageState, TerminalMessage};
pub use query_result::QueryResult;
