//! Slack domain module.
//!
//! Verification of inbound Slack requests signed with the app's signing secret.

mod errors;
mod request_verifier;

pub use errors::VerificationError;
pub use request_verifier::{SlackRequestVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
