//! HTTP middleware for axum.
//!
//! - `slack_signature` - Slack request signature verification

pub mod slack_signature;

pub use slack_signature::verify_slack_signature;
