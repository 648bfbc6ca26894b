//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `GenieClient` - Databricks Genie conversation API
//! - `MessageSender` - Posting answers back to a chat channel

mod genie_client;
mod message_sender;

pub use genie_client::GenieClient;
pub use message_sender::{DeliveryError, MessageSender};
