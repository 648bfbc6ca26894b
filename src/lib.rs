//! genie-bridge - Slack slash command bridge to Databricks Genie
//!
//! Accepts natural-language questions from a Slack slash command, asks them
//! in a Genie space, waits for the answer, and posts it back to the channel
//! as text or a rendered result table.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
