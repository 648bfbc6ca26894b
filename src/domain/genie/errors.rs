//! Error types for Genie calls and polling.

use thiserror::Error;

/// Errors returned by a Genie client call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection failure or timeout.
    #[error("Genie service unreachable: {0}")]
    Unreachable(String),

    /// Genie answered with a non-success HTTP status.
    #[error("Genie rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Response body lacked expected fields or was not valid JSON.
    #[error("malformed Genie response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Returns true if the same call may succeed when repeated.
    ///
    /// Transport failures, throttling and server errors are transient.
    /// Authentication, not-found and malformed responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Unreachable(_) => true,
            ClientError::Rejected { status, .. } => *status == 429 || *status >= 500,
            ClientError::Malformed(_) => false,
        }
    }
}

/// Errors that end a poll loop without a terminal message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// Attempt budget consumed while the message was still in progress.
    #[error("timed out waiting for Genie response after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// The final permitted attempt failed with a transient error.
    #[error("failed to get response after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// A status fetch failed in a way retrying cannot fix.
    #[error("status check rejected: {0}")]
    Rejected(#[source] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(ClientError::unreachable("connection reset").is_transient());
        assert!(ClientError::rejected(503, "unavailable").is_transient());
        assert!(ClientError::rejected(429, "slow down").is_transient());

        assert!(!ClientError::rejected(401, "bad token").is_transient());
        assert!(!ClientError::rejected(404, "no such space").is_transient());
        assert!(!ClientError::malformed("missing id").is_transient());
    }

    #[test]
    fn client_error_displays_correctly() {
        assert_eq!(
            ClientError::rejected(403, "forbidden").to_string(),
            "Genie rejected the request with status 403: forbidden"
        );
        assert_eq!(
            ClientError::malformed("missing conversation.id").to_string(),
            "malformed Genie response: missing conversation.id"
        );
    }

    #[test]
    fn poll_error_displays_correctly() {
        assert_eq!(
            PollError::Timeout { attempts: 30 }.to_string(),
            "timed out waiting for Genie response after 30 attempts"
        );

        let exhausted = PollError::Exhausted {
            attempts: 3,
            source: ClientError::unreachable("timeout"),
        };
        assert_eq!(
            exhausted.to_string(),
            "failed to get response after 3 attempts: Genie service unreachable: timeout"
        );
    }
}
