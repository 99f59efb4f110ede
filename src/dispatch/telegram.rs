//! Telegram Bot API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{DeliveryError, Messenger};
use crate::session::ChatId;

/// Public Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Timeout applied to `sendMessage`.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Client bound to one bot token.
pub struct TelegramClient {
    client: reqwest::Client,
    bot_api: String,
    send_timeout: Duration,
}

impl TelegramClient {
    /// Create a client for the given bot token against `api_base`.
    pub fn new(bot_token: &str, api_base: &str) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            bot_api: format!("{}/bot{}", api_base.trim_end_matches('/'), bot_token),
            send_timeout: DEFAULT_SEND_TIMEOUT,
        })
    }

    /// Override the `sendMessage` timeout.
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.bot_api, method)
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError> {
        let body = SendMessageBody {
            chat_id: chat_id.as_i64(),
            text,
        };

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .timeout(self.send_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(DeliveryError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<serde_json::Value, DeliveryError> {
        let mut query = vec![("url", url)];
        if let Some(secret) = secret_token {
            query.push(("secret_token", secret));
        }

        // The platform reports failures in the JSON body as well, so the body
        // is handed back whatever the status.
        let response = self
            .client
            .get(self.api_url("setWebhook"))
            .query(&query)
            .send()
            .await?;

        Ok(response.json().await?)
    }
}
