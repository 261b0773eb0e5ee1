use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur while relaying a prompt to an LLM provider.
///
/// Every variant that can surface from a request maps to a status code and a
/// JSON body through [`Error::status_code`] and [`Error::to_body`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing 'prompt' in request body.")]
    MissingPrompt,

    #[error("Invalid '{field}' in request body: expected {expected}.")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("OPENAI_API_KEY is not set in the environment.")]
    MissingApiKey,

    #[error("LLM provider returned an error")]
    ProviderStatus { status: u16, details: String },

    #[error("Failed to reach LLM provider")]
    Unreachable(String),

    #[error("Could not extract text from provider response")]
    Extraction { raw: Value },

    #[error("Unexpected error")]
    Unexpected(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_field(field: &'static str, expected: &'static str) -> Self {
        Error::InvalidField { field, expected }
    }

    pub fn provider_status(status: u16, details: impl Into<String>) -> Self {
        Error::ProviderStatus {
            status,
            details: details.into(),
        }
    }

    pub fn unreachable(details: impl Into<String>) -> Self {
        Error::Unreachable(details.into())
    }

    pub fn unexpected(details: impl Into<String>) -> Self {
        Error::Unexpected(details.into())
    }

    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingPrompt | Error::InvalidField { .. } | Error::MissingApiKey => {
                StatusCode::BAD_REQUEST
            }
            Error::ProviderStatus { .. } | Error::Unreachable(_) | Error::Extraction { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Error::Unexpected(_) | Error::Http(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body the error is reported with.
    pub fn to_body(&self) -> Value {
        match self {
            Error::MissingPrompt | Error::InvalidField { .. } | Error::MissingApiKey => {
                json!({ "error": self.to_string() })
            }
            Error::ProviderStatus { status, details } => json!({
                "error": self.to_string(),
                "status": status,
                "details": details,
            }),
            Error::Unreachable(details) | Error::Unexpected(details) => json!({
                "error": self.to_string(),
                "details": details,
            }),
            Error::Extraction { raw } => json!({
                "error": self.to_string(),
                "raw": raw,
            }),
            // Anything that is not a classified request failure is reported
            // the same way as an unclassified one.
            Error::Http(_) | Error::Io(_) => json!({
                "error": "Unexpected error",
                "details": self.to_string(),
            }),
        }
    }
}
