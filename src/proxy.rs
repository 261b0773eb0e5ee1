//! The prompt relay: validate, call the provider once, shape the reply.

use crate::provider::ChatProvider;
use crate::providers::openai::{ChatCompletionRequest, OpenAICompatProvider};
use crate::{Error, PromptRequest, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A successful relay result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyReply {
    pub text: String,
    pub model: String,
}

/// Relays prompt requests to a chat-completion provider.
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct LlmProxy {
    config: ProviderConfig,
    provider: Arc<dyn ChatProvider>,
}

impl LlmProxy {
    /// Create a proxy that talks to the endpoint named by `config`.
    pub fn from_config(config: ProviderConfig) -> Result<Self, Error> {
        let provider = OpenAICompatProvider::new(config.endpoint())?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a proxy with an explicit provider.
    pub fn with_provider(config: ProviderConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self { config, provider }
    }

    /// Handle one raw request body.
    ///
    /// Client errors are returned before the provider is called.
    pub async fn handle(&self, body: &[u8]) -> Result<ProxyReply, Error> {
        let request = PromptRequest::from_body(body, &self.config.default_model)?;
        self.relay(&request).await
    }

    /// Relay an already validated request.
    pub async fn relay(&self, request: &PromptRequest) -> Result<ProxyReply, Error> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let payload = ChatCompletionRequest::from(request);
        let text = self.provider.complete(api_key, &payload).await?;
        debug!(model = %request.model, chars = text.len(), "Relayed chat completion");

        Ok(ProxyReply {
            text,
            model: request.model.clone(),
        })
    }
}
