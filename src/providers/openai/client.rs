use super::types::{extract_text, ChatCompletionRequest};
use crate::provider::ChatProvider;
use crate::Error;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout applied to the whole outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Provider for OpenAI-compatible Chat Completions endpoints.
pub struct OpenAICompatProvider {
    client: Client,
    endpoint: String,
}

impl OpenAICompatProvider {
    /// Create a provider that posts to `endpoint` with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a provider with a custom timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Sort a failed send into "never got an HTTP response" or "something else
/// went wrong". Only used before a status line has been received.
fn classify(error: reqwest::Error) -> Error {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        Error::unreachable(error.to_string())
    } else {
        Error::unexpected(error.to_string())
    }
}

#[async_trait::async_trait]
impl ChatProvider for OpenAICompatProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<String, Error> {
        debug!(endpoint = %self.endpoint, model = %request.model, "Sending chat completion");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let details = match response.text().await {
                Ok(text) => text,
                Err(e) => e.to_string(),
            };
            warn!(status = status.as_u16(), "Provider returned an error status");
            return Err(Error::provider_status(status.as_u16(), details));
        }

        // The provider answered, so a broken body is no longer a reachability
        // problem.
        let body = response
            .text()
            .await
            .map_err(|e| Error::unexpected(format!("Failed to read provider reply: {e}")))?;
        let raw: Value = serde_json::from_str(&body)
            .map_err(|e| Error::unexpected(format!("Invalid JSON from provider: {e}")))?;

        match extract_text(&raw) {
            Some(text) => Ok(text),
            None => {
                warn!("Provider reply had no text in choices[0].message.content");
                Err(Error::Extraction { raw })
            }
        }
    }
}
