//! reqwest-backed OpenAI-compatible client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use super::{CompletionBackend, CompletionError, CompletionParams};
use crate::session::Turn;

/// Default API base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for an OpenAI-compatible chat completion API.
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| CompletionError::InvalidApiKey(e.to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_url(base_url),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Turn],
        params: &CompletionParams,
    ) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &params.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        tracing::debug!(
            model = %params.model,
            messages = messages.len(),
            "requesting chat completion"
        );

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed.first_content().ok_or(CompletionError::EmptyResponse)
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("http://localhost:8080/v1/"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_client_creation() {
        let client =
            OpenAiClient::new("sk-test", DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = OpenAiClient::new("bad\nkey", DEFAULT_BASE_URL, Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_params() {
        let params = CompletionParams::default();
        assert_eq!(params.model, "gpt-4o-mini");
        assert_eq!(params.max_tokens, 300);
        assert!((params.temperature - 0.9).abs() < f32::EPSILON);
    }
}
