//! Chat completion service access.
//!
//! [`CompletionBackend`] is the seam between the response generator and the
//! external language-model API. [`OpenAiClient`] speaks the OpenAI-compatible
//! `/chat/completions` protocol over reqwest.

mod client;
mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use types::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChoiceMessage};

use crate::session::Turn;

/// Failure talking to the completion service.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport failure (connect, TLS, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The body could not be decoded as a completion response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The API key cannot be sent as a header value.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The response carried no choices or no message content.
    #[error("completion response contained no text")]
    EmptyResponse,
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.9,
        }
    }
}

/// A service able to turn a message list into reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Request a completion for the given messages.
    ///
    /// Returns the raw (untrimmed) text of the first choice.
    async fn complete(
        &self,
        messages: &[Turn],
        params: &CompletionParams,
    ) -> Result<String, CompletionError>;
}
