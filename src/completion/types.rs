//! Wire types for the `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

use crate::session::Turn;

/// Request body.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response body. Only the fields the relay reads are modelled.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if present.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let messages = vec![Turn::system("be kind"), Turn::user("hi")];
        let req = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: 300,
            temperature: 0.9,
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!((json["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_first_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "  hello  "},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 5, "completion_tokens": 1}
        }"#;
        let resp: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.first_content().as_deref(), Some("  hello  "));
    }

    #[test]
    fn test_no_choices() {
        let resp: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_content().is_none());

        let resp: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(resp.first_content().is_none());
    }
}
