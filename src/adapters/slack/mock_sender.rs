//! Mock message sender for testing.
//!
//! Records every message and optionally fails deliveries in order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};

use crate::ports::{DeliveryError, MessageSender};

/// One recorded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: String,
    pub text: String,
}

/// Mock sender with recorded deliveries and error injection.
#[derive(Debug, Clone, Default)]
pub struct MockMessageSender {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failures: Arc<Mutex<VecDeque<DeliveryError>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockMessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the next delivery with `error`. The message is still recorded.
    pub fn with_failure(self, error: DeliveryError) -> Self {
        lock(&self.failures).push_back(error);
        self
    }

    /// Messages posted so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    /// Waits until at least `count` messages were posted or `timeout` elapses,
    /// then returns everything recorded.
    pub async fn wait_for_messages(&self, count: usize, timeout: Duration) -> Vec<SentMessage> {
        let deadline = Instant::now() + timeout;
        loop {
            let sent = self.sent();
            if sent.len() >= count || Instant::now() >= deadline {
                return sent;
            }
            sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl MessageSender for MockMessageSender {
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), DeliveryError> {
        lock(&self.sent).push(SentMessage {
            channel: channel.to_string(),
            text: text.to_string(),
        });

        match lock(&self.failures).pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
