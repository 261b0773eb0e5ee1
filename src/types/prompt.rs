use super::message::Message;
use crate::Error;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// System message used when the request does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling temperature used when the request does not supply one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Completion token limit used when the request does not supply one.
pub const DEFAULT_MAX_TOKENS: u64 = 256;

/// A validated prompt request with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub prompt: String,
    pub system: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl PromptRequest {
    /// Create a request for `prompt` with default system message and sampling.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the system message.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Parse and validate a raw request body.
    ///
    /// A body that is empty, not JSON, or not a JSON object is treated as an
    /// empty object, so it fails on the prompt check like any other request
    /// without a prompt. The prompt is trimmed. Optional fields set to `null`
    /// count as absent; present fields of the wrong type are rejected.
    pub fn from_body(body: &[u8], default_model: &str) -> Result<Self, Error> {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };

        let prompt = fields
            .get("prompt")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if prompt.is_empty() {
            return Err(Error::MissingPrompt);
        }

        let mut request = Self::new(prompt, default_model);
        if let Some(system) = optional_field(&fields, "system", "a string")? {
            request.system = system;
        }
        if let Some(model) = optional_field(&fields, "model", "a string")? {
            request.model = model;
        }
        if let Some(temperature) = optional_field(&fields, "temperature", "a number")? {
            request.temperature = temperature;
        }
        if let Some(max_tokens) =
            optional_field(&fields, "max_tokens", "a non-negative integer")?
        {
            request.max_tokens = max_tokens;
        }

        Ok(request)
    }

    /// The system and user messages sent to the provider.
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system.as_str()),
            Message::user(self.prompt.as_str()),
        ]
    }
}

fn optional_field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    field: &'static str,
    expected: &'static str,
) -> Result<Option<T>, Error> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| Error::invalid_field(field, expected)),
    }
}
