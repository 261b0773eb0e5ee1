//! OpenAI-compatible Chat Completions provider.

pub mod client;
pub mod types;

pub use client::{OpenAICompatProvider, DEFAULT_TIMEOUT};
pub use types::{extract_text, ChatCompletionRequest, Choice, ChoiceMessage};
