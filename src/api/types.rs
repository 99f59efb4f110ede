//! Webhook payload and response types.

use serde::{Deserialize, Serialize};

use crate::session::{ChatId, UserId};

/// Inbound Telegram update. Fields the relay ignores are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

/// A message inside an update.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub text: Option<String>,
    pub chat: Chat,
    pub from: Sender,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: UserId,
}

impl Update {
    /// Parse a webhook body.
    ///
    /// Returns `None` for empty bodies, invalid JSON, anything other than a
    /// non-empty object, and messages lacking a chat or sender id.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        match &value {
            serde_json::Value::Object(map) if !map.is_empty() => {}
            _ => return None,
        }
        serde_json::from_value(value).ok()
    }
}

impl IncomingMessage {
    /// Message text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Body returned by `/webhook` and on `/set_webhook` failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }

    /// Body absent or malformed.
    pub fn no_json() -> Self {
        Self::error("no json")
    }

    /// Webhook secret mismatch.
    pub fn unauthorized() -> Self {
        Self::error("unauthorized")
    }

    /// Reply queue saturated.
    pub fn busy() -> Self {
        Self::error("busy")
    }
}
