//! Query dispatcher.
//!
//! Accepts a question from the command webhook and answers it in the
//! background: one spawned task per question runs the AskGenie handler and
//! posts the result to the originating channel. The caller gets control back
//! before any remote call is made.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::ports::MessageSender;

use super::ask_genie::AskGenieHandler;

/// Command to answer a question in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitQueryCommand {
    /// Natural-language question.
    pub question: String,
    /// Channel the answer is posted to.
    pub channel_id: String,
    /// User who asked, when known.
    pub user_id: Option<String>,
}

impl SubmitQueryCommand {
    pub fn new(question: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            channel_id: channel_id.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Runs questions in the background and delivers their answers.
pub struct QueryDispatcher {
    asker: Arc<AskGenieHandler>,
    sender: Arc<dyn MessageSender>,
}

impl QueryDispatcher {
    pub fn new(asker: Arc<AskGenieHandler>, sender: Arc<dyn MessageSender>) -> Self {
        Self { asker, sender }
    }

    /// Spawns the background task for `cmd` and returns immediately.
    ///
    /// The returned handle is only needed by callers that want to await
    /// completion; dropping it detaches the task.
    pub fn submit(&self, cmd: SubmitQueryCommand) -> JoinHandle<()> {
        let asker = Arc::clone(&self.asker);
        let sender = Arc::clone(&self.sender);
        let query_id = Uuid::new_v4();

        let span = tracing::info_span!(
            "genie_query",
            %query_id,
            channel_id = %cmd.channel_id,
            user_id = cmd.user_id.as_deref().unwrap_or("-"),
        );

        tracing::info!(%query_id, channel_id = %cmd.channel_id, "Query accepted");

        tokio::spawn(
            async move {
                let answer = asker.handle(&cmd.question).await;

                match sender.post_message(&cmd.channel_id, &answer).await {
                    Ok(()) => tracing::info!("Answer delivered"),
                    Err(error) => tracing::error!(error = %error, "Failed to deliver answer"),
                }
            }
            .instrument(span),
        )
    }
}
