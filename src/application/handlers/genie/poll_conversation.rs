//! Conversation poller.
//!
//! Repeatedly checks a Genie message until it reaches a terminal state, the
//! attempt budget runs out, or a status check fails in a way retrying cannot
//! fix. The interval is fixed; there is no backoff.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::genie::{ConversationHandle, PollError, TerminalMessage};
use crate::ports::GenieClient;

/// Attempt budget and spacing for status polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status fetches.
    pub max_attempts: u32,
    /// Delay between consecutive fetches.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

impl PollConfig {
    /// Sets the attempt budget. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Polls a conversation message to completion.
pub struct ConversationPoller {
    client: Arc<dyn GenieClient>,
    config: PollConfig,
}

impl ConversationPoller {
    pub fn new(client: Arc<dyn GenieClient>, config: PollConfig) -> Self {
        Self { client, config }
    }

    /// Polls until the message is terminal.
    ///
    /// # Errors
    ///
    /// - `Timeout` - every attempt saw the message still in progress
    /// - `Exhausted` - the final attempt failed with a transient error
    /// - `Rejected` - a status check failed with a non-transient error
    pub async fn poll(&self, handle: &ConversationHandle) -> Result<TerminalMessage, PollError> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.client.fetch_status(handle).await {
                Ok(state) => match TerminalMessage::try_from(state) {
                    Ok(terminal) => {
                        if let TerminalMessage::Unknown { .. } = &terminal {
                            tracing::warn!(
                                conversation_id = handle.conversation_id(),
                                message_id = handle.message_id(),
                                attempt,
                                status = terminal.status_label(),
                                "Genie reported an unrecognised status"
                            );
                        }
                        return Ok(terminal);
                    }
                    Err(in_progress) => {
                        tracing::debug!(
                            conversation_id = handle.conversation_id(),
                            attempt,
                            state = ?in_progress,
                            "Genie message still in progress"
                        );
                    }
                },
                Err(error) if error.is_transient() => {
                    tracing::warn!(
                        conversation_id = handle.conversation_id(),
                        message_id = handle.message_id(),
                        attempt,
                        error = %error,
                        "Status check failed"
                    );
                    if attempt == max_attempts {
                        return Err(PollError::Exhausted {
                            attempts: attempt,
                            source: error,
                        });
                    }
                }
                Err(error) => {
                    tracing::error!(
                        conversation_id = handle.conversation_id(),
                        message_id = handle.message_id(),
                        attempt,
                        error = %error,
                        "Status check rejected"
                    );
                    return Err(PollError::Rejected(error));
                }
            }

            if attempt < max_attempts {
                sleep(self.config.interval).await;
            }
        }

        Err(PollError::Timeout {
            attempts: max_attempts,
        })
    }
}
