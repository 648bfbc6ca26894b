//! HTTP adapters - Inbound webhook endpoints.

pub mod middleware;
pub mod slack;

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use slack::{slack_router, SlackAppState};

/// Builds the application router with request tracing and a handler budget.
///
/// The timeout bounds only the webhook response; background answers are
/// not affected by it.
pub fn app_router(state: SlackAppState, request_timeout: Duration) -> Router {
    slack_router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
