//! Adapters - Implementations of ports and inbound HTTP endpoints.
//!
//! - `genie` - Databricks Genie REST client
//! - `slack` - Slack Web API message delivery
//! - `http` - Slash command webhook and health endpoint

pub mod genie;
pub mod http;
pub mod slack;
