//! A small web application: an in-memory item list plus a relay that forwards
//! prompts to an OpenAI-compatible chat-completion API.
//!
//! The relay ([`LlmProxy`]) validates the request, makes exactly one outbound
//! call through a [`ChatProvider`], and reports every failure as an [`Error`]
//! with a fixed status code and JSON body.

pub mod error;
pub mod items;
pub mod provider;
pub mod providers;
pub mod proxy;
pub mod server;
pub mod types;

// Re-export core types for easy usage
pub use error::Error;
pub use items::ItemStore;
pub use provider::ChatProvider;
pub use providers::*;
pub use proxy::{LlmProxy, ProxyReply};
pub use server::{router, AppState};
pub use types::*;
