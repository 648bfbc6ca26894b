//! Databricks Genie client - Implementation of GenieClient over the REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GenieClientConfig::new("adb-123.azuredatabricks.net", token, space_id)
//!     .with_request_timeout(Duration::from_secs(30))
//!     .with_attachment_timeout(Duration::from_secs(60));
//!
//! let client = DatabricksGenieClient::new(config)?;
//! ```
//!
//! # Endpoints
//!
//! All paths live under `/api/2.0/genie/spaces/{space_id}`:
//!
//! - `POST start-conversation`
//! - `GET conversations/{cid}/messages/{mid}`
//! - `GET conversations/{cid}/messages/{mid}/attachments/{aid}/query-result`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

use crate::domain::genie::{ClientError, ConversationHandle, MessageState, QueryResult};
use crate::ports::GenieClient;

use super::dto::{
    GenieMessageResponse, QueryResultResponse, StartConversationRequest,
    StartConversationResponse,
};

/// Configuration for the Databricks Genie client.
#[derive(Debug, Clone)]
pub struct GenieClientConfig {
    /// Workspace base URL, always with scheme and without trailing slash.
    pub base_url: String,
    /// Personal access or service principal token.
    token: Secret<String>,
    /// Genie space all questions are asked in.
    pub space_id: String,
    /// Timeout for start and status calls.
    pub request_timeout: Duration,
    /// Timeout for attachment result downloads.
    pub attachment_timeout: Duration,
}

impl GenieClientConfig {
    /// Creates a configuration for the given workspace host.
    ///
    /// A bare host such as `adb-1.azuredatabricks.net` is reached over https.
    pub fn new(
        host: impl AsRef<str>,
        token: impl Into<String>,
        space_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(host.as_ref()),
            token: Secret::new(token.into()),
            space_id: space_id.into(),
            request_timeout: Duration::from_secs(30),
            attachment_timeout: Duration::from_secs(60),
        }
    }

    /// Sets the timeout for start and status calls.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the timeout for attachment result downloads.
    pub fn with_attachment_timeout(mut self, timeout: Duration) -> Self {
        self.attachment_timeout = timeout;
        self
    }

    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

fn normalize_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Genie client backed by the Databricks REST API.
pub struct DatabricksGenieClient {
    config: GenieClientConfig,
    client: Client,
}

impl DatabricksGenieClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: GenieClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { config, client })
    }

    fn space_url(&self) -> String {
        format!(
            "{}/api/2.0/genie/spaces/{}",
            self.config.base_url, self.config.space_id
        )
    }

    fn start_url(&self) -> String {
        format!("{}/start-conversation", self.space_url())
    }

    fn message_url(&self, handle: &ConversationHandle) -> String {
        format!(
            "{}/conversations/{}/messages/{}",
            self.space_url(),
            handle.conversation_id(),
            handle.message_id()
        )
    }

    fn query_result_url(&self, handle: &ConversationHandle, attachment_id: &str) -> String {
        format!(
            "{}/attachments/{}/query-result",
            self.message_url(handle),
            attachment_id
        )
    }

    /// Sends a request and decodes a successful JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T, ClientError> {
        let response = request
            .bearer_auth(self.config.token())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::unreachable(format!(
                        "request timed out after {}s",
                        timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ClientError::unreachable(format!("connection failed: {}", e))
                } else {
                    ClientError::unreachable(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::unreachable(format!("failed to read body: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::malformed(format!("invalid JSON: {}", e)))
    }

    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Genie request rejected");

        Err(ClientError::rejected(status.as_u16(), body))
    }
}

#[async_trait]
impl GenieClient for DatabricksGenieClient {
    async fn start_conversation(&self, question: &str) -> Result<ConversationHandle, ClientError> {
        let request = self
            .client
            .post(self.start_url())
            .json(&StartConversationRequest { content: question });

        let response: StartConversationResponse =
            self.execute(request, self.config.request_timeout).await?;
        let handle = response.into_handle()?;

        tracing::info!(
            conversation_id = handle.conversation_id(),
            message_id = handle.message_id(),
            "Started Genie conversation"
        );

        Ok(handle)
    }

    async fn fetch_status(&self, handle: &ConversationHandle) -> Result<MessageState, ClientError> {
        let request = self.client.get(self.message_url(handle));

        let response: GenieMessageResponse =
            self.execute(request, self.config.request_timeout).await?;

        tracing::debug!(
            conversation_id = handle.conversation_id(),
            message_id = handle.message_id(),
            status = response.status().unwrap_or("<none>"),
            "Fetched Genie message status"
        );

        Ok(response.into_state())
    }

    async fn fetch_attachment_result(
        &self,
        handle: &ConversationHandle,
        attachment_id: &str,
    ) -> Result<QueryResult, ClientError> {
        let request = self.client.get(self.query_result_url(handle, attachment_id));

        let response: QueryResultResponse =
            self.execute(request, self.config.attachment_timeout).await?;
        let result = response.into_query_result()?;

        tracing::debug!(
            attachment_id,
            columns = result.columns.len(),
            rows = result.row_count(),
            "Fetched Genie query result"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DatabricksGenieClient {
        DatabricksGenieClient::new(GenieClientConfig::new(
            "adb-123.azuredatabricks.net",
            "dapi-token",
            "space-9",
        ))
        .unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GenieClientConfig::new("https://example.cloud.databricks.com/", "t", "s")
            .with_request_timeout(Duration::from_secs(5))
            .with_attachment_timeout(Duration::from_secs(15));

        assert_eq!(config.base_url, "https://example.cloud.databricks.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.attachment_timeout, Duration::from_secs(15));
        assert_eq!(config.token(), "t");
    }

    #[test]
    fn config_defaults_match_genie_limits() {
        let config = GenieClientConfig::new("host", "t", "s");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.attachment_timeout, Duration::from_secs(60));
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        assert_eq!(normalize_base_url("adb-1.net"), "https://adb-1.net");
        assert_eq!(normalize_base_url("http://localhost:8080/"), "http://localhost:8080");
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let config = GenieClientConfig::new("host", "dapi-super-secret", "s");
        assert!(!format!("{:?}", config).contains("dapi-super-secret"));
    }

    #[test]
    fn urls_follow_genie_paths() {
        let client = client();
        let handle = ConversationHandle::new("c1", "m1");

        assert_eq!(
            client.start_url(),
            "https://adb-123.azuredatabricks.net/api/2.0/genie/spaces/space-9/start-conversation"
        );
        assert_eq!(
            client.message_url(&handle),
            "https://adb-123.azuredatabricks.net/api/2.0/genie/spaces/space-9/conversations/c1/messages/m1"
        );
        assert_eq!(
            client.query_result_url(&handle, "a1"),
            "https://adb-123.azuredatabricks.net/api/2.0/genie/spaces/space-9/conversations/c1/messages/m1/attachments/a1/query-result"
        );
    }
}
