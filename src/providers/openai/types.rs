use crate::types::{Message, PromptRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat Completions API request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl From<&PromptRequest> for ChatCompletionRequest {
    fn from(request: &PromptRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request.messages(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// A single choice in a Chat Completions API response.
///
/// Every level is optional so that a choice with missing fields still
/// decodes; only a field of the wrong type fails the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Message carried by a choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl Choice {
    /// Content of this choice's message, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

/// Extract the first choice's text from a parsed provider reply.
///
/// Only `choices[0]` is decoded; later choices are never looked at. A missing
/// field and a field of the wrong type are the same outcome: `None`.
pub fn extract_text(raw: &Value) -> Option<String> {
    let first = raw.get("choices")?.as_array()?.first()?;
    let choice = Choice::deserialize(first).ok()?;
    choice.text().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_payload_shape() {
        let prompt = PromptRequest::new("Hello", "gpt-4o-mini");
        let payload = serde_json::to_value(ChatCompletionRequest::from(&prompt)).unwrap();
        assert_eq!(
            payload,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "Hello" }
                ],
                "temperature": 0.7,
                "max_tokens": 256
            })
        );
    }

    #[test]
    fn test_extract_first_choice() {
        let raw = json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" } },
                { "index": 1, "message": { "role": "assistant", "content": "second" } }
            ]
        });
        assert_eq!(extract_text(&raw).as_deref(), Some("first"));
    }

    #[test]
    fn test_later_choices_are_ignored() {
        let raw = json!({ "choices": [{ "message": { "content": "hi" } }, "junk"] });
        assert_eq!(extract_text(&raw).as_deref(), Some("hi"));

        let raw = json!({
            "choices": [
                { "message": { "content": "hi" } },
                { "message": { "content": [{ "type": "text", "text": "part" }] } }
            ]
        });
        assert_eq!(extract_text(&raw).as_deref(), Some("hi"));
    }

    #[test]
    fn test_extraction_failures() {
        for raw in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": null }),
            json!({ "choices": "nope" }),
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": {} }] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "choices": [{ "message": { "content": "" } }] }),
            json!({ "choices": [{ "message": { "content": ["a", "b"] } }] }),
            json!([1, 2, 3]),
            json!("plain string"),
        ] {
            assert_eq!(extract_text(&raw), None, "expected no text for {raw}");
        }
    }
}
