//! Genie configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Databricks Genie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenieConfig {
    /// Workspace host, bare (`adb-1.azuredatabricks.net`) or with `https://`
    #[serde(default)]
    pub host: String,

    /// Access token
    #[serde(default = "empty_secret")]
    pub token: Secret<String>,

    /// Genie space questions are asked in
    #[serde(default)]
    pub space_id: String,

    /// Timeout for start and status calls in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for attachment result downloads in seconds
    #[serde(default = "default_attachment_timeout")]
    pub attachment_timeout_secs: u64,

    /// Maximum status checks per question
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,

    /// Delay between status checks in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl GenieConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn attachment_timeout(&self) -> Duration {
        Duration::from_secs(self.attachment_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate Genie configuration
    ///
    /// Plain `http://` hosts are only accepted outside production.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ValidationError::MissingRequired("GENIE_BRIDGE__GENIE__HOST"));
        }
        if self.token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("GENIE_BRIDGE__GENIE__TOKEN"));
        }
        if self.space_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GENIE_BRIDGE__GENIE__SPACE_ID"));
        }

        if host.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidGenieHost);
        }
        match host.split_once("://") {
            None => {}
            Some(("https", rest)) | Some(("http", rest)) if rest.is_empty() => {
                return Err(ValidationError::InvalidGenieHost);
            }
            Some(("https", _)) => {}
            Some(("http", _)) if !production => {}
            Some(_) => return Err(ValidationError::InvalidGenieHost),
        }

        if self.request_timeout_secs == 0 || self.attachment_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.poll_max_attempts == 0 {
            return Err(ValidationError::InvalidPollAttempts);
        }
        Ok(())
    }
}

impl Default for GenieConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            token: empty_secret(),
            space_id: String::new(),
            request_timeout_secs: default_request_timeout(),
            attachment_timeout_secs: default_attachment_timeout(),
            poll_max_attempts: default_poll_max_attempts(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_request_timeout() -> u64 {
    30
}

fn default_attachment_timeout() -> u64 {
    60
}

fn default_poll_max_attempts() -> u32 {
    30
}

fn default_poll_interval() -> u64 {
    2
}
