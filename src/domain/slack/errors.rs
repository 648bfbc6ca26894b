//! Error types for Slack request verification.

use axum::http::StatusCode;
use thiserror::Error;

/// Reasons an inbound Slack request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// A required signing header was not sent.
    #[error("Missing header: {0}")]
    MissingHeader(&'static str),

    /// Timestamp header is not an integer.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Request is older than the allowed window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Request claims to come from the future beyond clock skew tolerance.
    #[error("Timestamp in the future")]
    TimestampInFuture,

    /// Signature header is malformed or does not match the body.
    #[error("Invalid signature")]
    InvalidSignature,
}

impl VerificationError {
    /// Maps the error to the HTTP status returned to Slack.
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerificationError::InvalidTimestamp | VerificationError::TimestampInFuture => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
