//! HTTP handlers for Slack endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::application::handlers::{QueryDispatcher, SubmitQueryCommand};
use crate::domain::slack::SlackRequestVerifier;

use super::dto::{CommandAck, SlashCommandForm};

/// Shared state for the Slack endpoints.
#[derive(Clone)]
pub struct SlackAppState {
    pub dispatcher: Arc<QueryDispatcher>,
    pub verifier: Arc<SlackRequestVerifier>,
    /// Slash command this deployment answers, e.g. `/genie`.
    pub command: String,
}

/// POST /slack/commands - Accept a slash command and answer it in the background.
pub async fn handle_slash_command(
    State(state): State<SlackAppState>,
    Form(form): Form<SlashCommandForm>,
) -> Response {
    if form.command != state.command {
        tracing::warn!(command = %form.command, "Unsupported slash command");
        return (StatusCode::BAD_REQUEST, "Unsupported command").into_response();
    }

    let question = form.text.trim();
    if question.is_empty() {
        return Json(CommandAck::usage(&state.command)).into_response();
    }

    let mut cmd = SubmitQueryCommand::new(question, &form.channel_id);
    if let Some(user_id) = form.user_id.as_deref() {
        cmd = cmd.with_user_id(user_id);
    }

    // Detached: the answer is posted to the channel when ready.
    state.dispatcher.submit(cmd);

    Json(CommandAck::processing(question)).into_response()
}

/// GET /health - Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
