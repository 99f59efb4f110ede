//! Outbound delivery to the messaging platform.
//!
//! [`Messenger`] abstracts the Bot API calls the relay makes;
//! [`TelegramClient`] implements it over reqwest. [`NotificationDispatcher`]
//! sits on top and gives best-effort, fire-and-forget delivery.

mod notifier;
mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use notifier::{
    truncate_reply, NotificationDispatcher, ELLIPSIS, MAX_MESSAGE_CHARS, TRUNCATED_CHARS,
};
pub use telegram::{TelegramClient, DEFAULT_API_BASE, DEFAULT_SEND_TIMEOUT};

use crate::session::ChatId;

/// Failure delivering to the messaging platform.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Transport failure (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("platform error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Bot API operations used by the relay.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a plain text message to a chat.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError>;

    /// Register `url` as the bot's webhook. Returns the platform's raw JSON reply.
    async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<serde_json::Value, DeliveryError>;
}
