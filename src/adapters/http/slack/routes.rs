//! Axum router configuration for Slack endpoints.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::verify_slack_signature;

use super::handlers::{handle_slash_command, health, SlackAppState};

/// Create the Slack router.
///
/// # Routes
///
/// - `POST /slack/commands` - Slash command webhook (signature verified)
/// - `GET /health` - Liveness probe (no verification)
pub fn slack_router(state: SlackAppState) -> Router {
    let verifier = Arc::clone(&state.verifier);

    let commands = Router::new()
        .route("/slack/commands", post(handle_slash_command))
        .route_layer(middleware::from_fn_with_state(verifier, verify_slack_signature));

    Router::new()
        .route("/health", get(health))
        .merge(commands)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::genie::MockGenieClient;
    use crate::adapters::slack::MockMessageSender;
    use crate::application::handlers::{
        AskGenieHandler, ConversationPoller, PollConfig, QueryDispatcher,
    };
    use crate::domain::genie::MessageState;
    use crate::domain::slack::{SlackRequestVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use crate::ports::GenieClient;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";

    struct Fixture {
        router: Router,
        client: MockGenieClient,
        sender: MockMessageSender,
    }

    fn fixture(client: MockGenieClient) -> Fixture {
        let sender = MockMessageSender::new();
        let genie: Arc<dyn GenieClient> = Arc::new(client.clone());
        let poller = ConversationPoller::new(
            Arc::clone(&genie),
            PollConfig::default().with_interval(Duration::from_millis(1)),
        );
        let dispatcher = QueryDispatcher::new(
            Arc::new(AskGenieHandler::new(genie, poller)),
            Arc::new(sender.clone()),
        );

        let state = SlackAppState {
            dispatcher: Arc::new(dispatcher),
            verifier: Arc::new(SlackRequestVerifier::new(SECRET, 300)),
            command: "/genie".to_string(),
        };

        Fixture {
            router: slack_router(state),
            client,
            sender,
        }
    }

    fn signed_command(body: &str) -> Request<Body> {
        let ts = chrono::Utc::now().timestamp();
        let signature = SlackRequestVerifier::new(SECRET, 300).sign(ts, body.as_bytes());

        Request::builder()
            .method("POST")
            .uri("/slack/commands")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(TIMESTAMP_HEADER, ts.to_string())
            .header(SIGNATURE_HEADER, signature)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_signature() {
        let fx = fixture(MockGenieClient::new());

        let response = fx
            .router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn question_is_acknowledged_and_answered_in_channel() {
        let fx = fixture(MockGenieClient::new().with_status(MessageState::Completed {
            content: Some("42".to_string()),
            attachments: vec![],
        }));

        let response = fx
            .router
            .oneshot(signed_command(
                "command=%2Fgenie&text=meaning+of+life&channel_id=C42&user_id=U1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["response_type"], "in_channel");
        assert_eq!(json["text"], "Processing your query: meaning of life...");

        let sent = fx.sender.wait_for_messages(1, Duration::from_secs(2)).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel, "C42");
        assert_eq!(sent[0].text, "42");
        assert_eq!(fx.client.questions(), vec!["meaning of life".to_string()]);
    }

    #[tokio::test]
    async fn other_command_is_rejected() {
        let fx = fixture(MockGenieClient::new());

        let response = fx
            .router
            .oneshot(signed_command("command=%2Fweather&text=today&channel_id=C1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Unsupported command");
        assert!(fx.client.questions().is_empty());
    }

    #[tokio::test]
    async fn blank_question_gets_usage_hint() {
        let fx = fixture(MockGenieClient::new());

        let response = fx
            .router
            .oneshot(signed_command("command=%2Fgenie&text=+++&channel_id=C1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["response_type"], "ephemeral");

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(fx.client.questions().is_empty());
        assert!(fx.sender.sent().is_empty());
    }

    #[tokio::test]
    async fn unsigned_command_is_unauthorized() {
        let fx = fixture(MockGenieClient::new());

        let request = Request::builder()
            .method("POST")
            .uri("/slack/commands")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("command=%2Fgenie&text=hi&channel_id=C1"))
            .unwrap();

        let response = fx.router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(fx.client.questions().is_empty());
    }
}
