//! Slack request signature middleware.
//!
//! Buffers the request body, verifies the Slack signing headers against it,
//! and hands the request on with the body restored. Handlers behind this
//! layer can use any body extractor.
//!
//! # Example
//!
//! ```ignore
//! let verifier = Arc::new(SlackRequestVerifier::new(signing_secret, 300));
//!
//! let app = Router::new()
//!     .route("/slack/commands", post(handle_slash_command))
//!     .route_layer(middleware::from_fn_with_state(verifier, verify_slack_signature));
//! ```

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::slack::{SlackRequestVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Largest body accepted for verification. Slash command payloads are a few KiB.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Rejects requests whose Slack signature does not verify.
pub async fn verify_slack_signature(
    State(verifier): State<Arc<SlackRequestVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read Slack request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let timestamp = header_str(&parts.headers, TIMESTAMP_HEADER);
    let signature = header_str(&parts.headers, SIGNATURE_HEADER);

    if let Err(e) = verifier.verify(&bytes, timestamp, signature) {
        tracing::warn!(error = %e, "Rejected Slack request");
        let status = e.status_code();
        let body = if status == StatusCode::UNAUTHORIZED {
            "Unauthorized".to_string()
        } else {
            e.to_string()
        };
        return (status, body).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
