//! Best-effort reply delivery.

use std::borrow::Cow;
use std::sync::Arc;

use super::Messenger;
use crate::session::ChatId;

/// Platform message-size ceiling, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Characters kept when a reply is cut down.
pub const TRUNCATED_CHARS: usize = 3990;

/// Marker appended to a truncated reply.
pub const ELLIPSIS: char = '…';

/// Shorten `text` to fit the platform limit.
///
/// Texts of at most [`MAX_MESSAGE_CHARS`] characters are returned unchanged;
/// longer ones keep their first [`TRUNCATED_CHARS`] characters plus
/// [`ELLIPSIS`]. Counts Unicode scalar values, never splitting a character.
pub fn truncate_reply(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(text);
    }

    let mut truncated: String = text.chars().take(TRUNCATED_CHARS).collect();
    truncated.push(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Fire-and-forget delivery on top of a [`Messenger`].
#[derive(Clone)]
pub struct NotificationDispatcher {
    messenger: Arc<dyn Messenger>,
}

impl NotificationDispatcher {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self { messenger }
    }

    /// Underlying messenger.
    pub fn messenger(&self) -> &Arc<dyn Messenger> {
        &self.messenger
    }

    /// Deliver `text` to `chat_id`.
    ///
    /// Truncates oversized text first. Failures are logged and dropped.
    pub async fn deliver(&self, chat_id: ChatId, text: &str) {
        let text = truncate_reply(text);

        match self.messenger.send_message(chat_id, &text).await {
            Ok(()) => tracing::debug!(
                chat_id = %chat_id,
                chars = text.chars().count(),
                "reply delivered"
            ),
            Err(e) => tracing::error!(chat_id = %chat_id, error = %e, "failed to send message"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DeliveryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(ChatId, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            if self.fail {
                return Err(DeliveryError::Api {
                    status: 403,
                    message: "bot was blocked by the user".into(),
                });
            }
            Ok(())
        }

        async fn set_webhook(
            &self,
            _url: &str,
            _secret_token: Option<&str>,
        ) -> Result<serde_json::Value, DeliveryError> {
            Ok(serde_json::json!({"ok": true}))
        }
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_reply("hello"), "hello");
        let exact = "x".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(truncate_reply(&exact).len(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_long_text_truncated() {
        let long = "y".repeat(MAX_MESSAGE_CHARS + 1);
        let out = truncate_reply(&long);
        assert_eq!(out.chars().count(), TRUNCATED_CHARS + 1);
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.starts_with(&"y".repeat(TRUNCATED_CHARS)));
    }

    #[test]
    fn test_truncation_counts_characters() {
        // Persian letters are two bytes each in UTF-8
        let long = "س".repeat(4500);
        let out = truncate_reply(&long);
        assert_eq!(out.chars().count(), TRUNCATED_CHARS + 1);

        let fits = "س".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(truncate_reply(&fits), fits.as_str());
    }

    #[tokio::test]
    async fn test_deliver_truncates_before_send() {
        let messenger = Arc::new(RecordingMessenger::default());
        let dispatcher = NotificationDispatcher::new(messenger.clone());

        dispatcher.deliver(ChatId::new(9), &"z".repeat(5000)).await;

        let sent = messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, ChatId::new(9));
        assert_eq!(sent[0].1.chars().count(), TRUNCATED_CHARS + 1);
    }

    #[tokio::test]
    async fn test_deliver_swallows_errors() {
        let messenger = Arc::new(RecordingMessenger {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::new(messenger.clone());

        // Must not panic or propagate
        dispatcher.deliver(ChatId::new(1), "hi").await;

        assert_eq!(messenger.sent.lock().unwrap().len(), 1);
    }
}
