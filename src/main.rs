//! genie-bridge server entry point.
//!
//! Startup order:
//! 1. Load and validate configuration from the environment.
//! 2. Initialise tracing (JSON in production, human-readable otherwise).
//! 3. Build the Genie client, Slack sender and question handlers.
//! 4. Serve the webhook router until Ctrl-C or SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use genie_bridge::adapters::genie::{DatabricksGenieClient, GenieClientConfig};
use genie_bridge::adapters::http::{app_router, SlackAppState};
use genie_bridge::adapters::slack::{SlackWebApiConfig, SlackWebApiSender};
use genie_bridge::application::{AskGenieHandler, ConversationPoller, PollConfig, QueryDispatcher};
use genie_bridge::config::{AppConfig, ConfigError, ValidationError};
use genie_bridge::domain::slack::SlackRequestVerifier;
use genie_bridge::ports::{GenieClient, MessageSender};

#[derive(Debug, Error)]
enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for BootstrapError {
    fn from(err: ValidationError) -> Self {
        BootstrapError::Config(ConfigError::ValidationFailed(err))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Tracing may not be initialised yet.
            eprintln!("genie-bridge: {}", e);
            tracing::error!(error = %e, "genie-bridge exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "genie-bridge starting"
    );

    let genie: Arc<dyn GenieClient> = Arc::new(DatabricksGenieClient::new(
        GenieClientConfig::new(
            &config.genie.host,
            config.genie.token.expose_secret().as_str(),
            config.genie.space_id.as_str(),
        )
        .with_request_timeout(config.genie.request_timeout())
        .with_attachment_timeout(config.genie.attachment_timeout()),
    )?);

    let sender: Arc<dyn MessageSender> = Arc::new(SlackWebApiSender::new(
        SlackWebApiConfig::new(config.slack.bot_token.expose_secret().as_str())
            .with_api_base(config.slack.api_base.as_str()),
    )?);

    let poller = ConversationPoller::new(
        Arc::clone(&genie),
        PollConfig::default()
            .with_max_attempts(config.genie.poll_max_attempts)
            .with_interval(config.genie.poll_interval()),
    );
    let asker = Arc::new(AskGenieHandler::new(genie, poller));
    let dispatcher = Arc::new(QueryDispatcher::new(asker, sender));

    let state = SlackAppState {
        dispatcher,
        verifier: Arc::new(SlackRequestVerifier::new(
            config.slack.signing_secret.expose_secret().as_str(),
            config.slack.max_request_age_secs,
        )),
        command: config.slack.command.clone(),
    };
    let app = app_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, command = %config.slack.command, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("genie-bridge stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
