//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Log level directive must not be empty")]
    InvalidLogLevel,

    #[error("Invalid Genie host (expected a bare host or https:// URL)")]
    InvalidGenieHost,

    #[error("Poll max attempts must be at least 1")]
    InvalidPollAttempts,

    #[error("Invalid Slack bot token format")]
    InvalidSlackBotToken,

    #[error("Slack command must start with '/'")]
    InvalidSlackCommand,

    #[error("Invalid Slack API base URL")]
    InvalidSlackApiBase,
}
