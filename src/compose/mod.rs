//! Message generation
//!
//! Builds the prompt from the context file and the operator's topic, and
//! calls the remote chat completion endpoint exactly once.

mod client;
mod prompt;
mod types;

pub use client::CompletionClient;
pub use prompt::{build_prompt, load_context};
pub use types::{ChatRequest, Message};

use crate::config::{CompletionSettings, Config};
use crate::crawler::build_http_client;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Completion errors
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection failed, timed out, or the client could not be built
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Completion response contained no choices")]
    EmptyResponse,

    #[error("Context file not found: {}", .0.display())]
    ContextMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompletionError {
    pub fn is_context_missing(&self) -> bool {
        matches!(self, CompletionError::ContextMissing(_))
    }
}

/// Generates the outreach message for `topic`
///
/// Reads the configured context file, builds the request with the configured
/// model and system prompt, and returns the generated text verbatim.
pub async fn generate_email(
    config: &Config,
    settings: &CompletionSettings,
    topic: &str,
) -> Result<String, CompletionError> {
    let context = load_context(Path::new(&config.files.context))?;

    let http_client = build_http_client(&config.user_agent, config.completion.request_timeout())
        .map_err(|e| CompletionError::Network(e.to_string()))?;

    let client = CompletionClient::new(http_client, settings.api_key.clone())
        .with_base_url(config.completion.base_url.clone());

    let request = ChatRequest::new(config.completion.model.clone())
        .message(Message::system(config.completion.system_prompt.clone()))
        .message(Message::user(build_prompt(&context, topic)));

    client.complete(&request).await
}
