//! Slack Web API sender - Implementation of MessageSender via chat.postMessage.
//!
//! Slack answers HTTP 200 for most API failures and reports them through the
//! `ok` and `error` fields of the body, so both layers are checked.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{DeliveryError, MessageSender};

/// Configuration for the Slack Web API sender.
#[derive(Debug, Clone)]
pub struct SlackWebApiConfig {
    /// Base URL of the Web API (default: https://slack.com/api).
    pub api_base: String,
    /// Bot user OAuth token (`xoxb-...`).
    bot_token: Secret<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl SlackWebApiConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            api_base: "https://slack.com/api".to_string(),
            bot_token: Secret::new(bot_token.into()),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn bot_token(&self) -> &str {
        self.bot_token.expose_secret()
    }
}

/// Posts messages with the Slack Web API.
pub struct SlackWebApiSender {
    config: SlackWebApiConfig,
    client: Client,
}

impl SlackWebApiSender {
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built.
    pub fn new(config: SlackWebApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn post_message_url(&self) -> String {
        format!("{}/chat.postMessage", self.config.api_base)
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    unfurl_links: bool,
    unfurl_media: bool,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

impl PostMessageResponse {
    fn into_result(self) -> Result<(), DeliveryError> {
        if self.ok {
            Ok(())
        } else {
            Err(DeliveryError::api(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[async_trait]
impl MessageSender for SlackWebApiSender {
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), DeliveryError> {
        let payload = PostMessageRequest {
            channel,
            text,
            unfurl_links: false,
            unfurl_media: false,
        };

        let response = self
            .client
            .post(self.post_message_url())
            .bearer_auth(self.config.bot_token())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::unreachable(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    DeliveryError::unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::api(format!("invalid response body: {}", e)))?;

        body.into_result()?;

        tracing::debug!(channel, chars = text.len(), "Posted message to Slack");
        Ok(())
    }
}
