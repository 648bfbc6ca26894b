//! Mock Genie client for testing.
//!
//! Scripted responses are consumed in order. Once the status script runs dry
//! every further status fetch reports `Running`, which is how tests drive a
//! poll loop into its attempt limit.
//!
//! # Example
//!
//! ```ignore
//! let client = MockGenieClient::new()
//!     .with_status(MessageState::Running)
//!     .with_status(completed_with_attachment("a1"))
//!     .with_query_result(QueryResult::new(columns, rows));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::domain::genie::{ClientError, ConversationHandle, MessageState, QueryResult};
use crate::ports::GenieClient;

/// Mock Genie client with scripted responses and call tracking.
#[derive(Debug, Clone)]
pub struct MockGenieClient {
    starts: Arc<Mutex<VecDeque<Result<ConversationHandle, ClientError>>>>,
    statuses: Arc<Mutex<VecDeque<Result<MessageState, ClientError>>>>,
    results: Arc<Mutex<VecDeque<Result<QueryResult, ClientError>>>>,
    /// Simulated latency of every call.
    delay: Duration,
    questions: Arc<Mutex<Vec<String>>>,
    status_calls: Arc<Mutex<u32>>,
    attachment_calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockGenieClient {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockGenieClient {
    pub fn new() -> Self {
        Self {
            starts: Arc::new(Mutex::new(VecDeque::new())),
            statuses: Arc::new(Mutex::new(VecDeque::new())),
            results: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            questions: Arc::new(Mutex::new(Vec::new())),
            status_calls: Arc::new(Mutex::new(0)),
            attachment_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a failure for the next start call.
    pub fn with_start_error(self, error: ClientError) -> Self {
        lock(&self.starts).push_back(Err(error));
        self
    }

    /// Queues a status.
    pub fn with_status(self, state: MessageState) -> Self {
        lock(&self.statuses).push_back(Ok(state));
        self
    }

    /// Queues several statuses in order.
    pub fn with_statuses(self, states: impl IntoIterator<Item = MessageState>) -> Self {
        lock(&self.statuses).extend(states.into_iter().map(Ok));
        self
    }

    /// Queues a failed status fetch.
    pub fn with_status_error(self, error: ClientError) -> Self {
        lock(&self.statuses).push_back(Err(error));
        self
    }

    /// Queues an attachment result.
    pub fn with_query_result(self, result: QueryResult) -> Self {
        lock(&self.results).push_back(Ok(result));
        self
    }

    /// Queues a failed attachment fetch.
    pub fn with_attachment_error(self, error: ClientError) -> Self {
        lock(&self.results).push_back(Err(error));
        self
    }

    /// Delays every call by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Questions passed to `start_conversation`, in call order.
    pub fn questions(&self) -> Vec<String> {
        lock(&self.questions).clone()
    }

    /// Number of status fetches made so far.
    pub fn status_calls(&self) -> u32 {
        *lock(&self.status_calls)
    }

    /// Attachment ids fetched so far.
    pub fn attachment_calls(&self) -> Vec<String> {
        lock(&self.attachment_calls).clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl GenieClient for MockGenieClient {
    async fn start_conversation(&self, question: &str) -> Result<ConversationHandle, ClientError> {
        lock(&self.questions).push(question.to_string());
        self.simulate_latency().await;

        lock(&self.starts)
            .pop_front()
            .unwrap_or_else(|| Ok(ConversationHandle::new("conv-1", "msg-1")))
    }

    async fn fetch_status(&self, _handle: &ConversationHandle) -> Result<MessageState, ClientError> {
        *lock(&self.status_calls) += 1;
        self.simulate_latency().await;

        lock(&self.statuses)
            .pop_front()
            .unwrap_or(Ok(MessageState::Running))
    }

    async fn fetch_attachment_result(
        &self,
        _handle: &ConversationHandle,
        attachment_id: &str,
    ) -> Result<QueryResult, ClientError> {
        lock(&self.attachment_calls).push(attachment_id.to_string());
        self.simulate_latency().await;

        lock(&self.results)
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::new(Vec::new(), Vec::new())))
    }
}
