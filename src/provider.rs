use crate::providers::openai::ChatCompletionRequest;
use crate::Error;

/// A trait for chat-completion providers.
///
/// One call is one outbound request: implementations must not retry. The
/// returned string is the extracted reply text, never empty.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync + 'static {
    /// Send a chat completion and extract the text of the first choice.
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest)
        -> Result<String, Error>;
}
