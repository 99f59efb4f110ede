//! Response generator: safety gate, history, completion call.

use std::sync::Arc;

use super::prompt::{FALLBACK_MESSAGE, REFUSAL_MESSAGE, SYSTEM_PROMPT};
use crate::completion::{CompletionBackend, CompletionError, CompletionParams};
use crate::error::RelayError;
use crate::safety;
use crate::session::{Role, SessionStore, Turn, UserId};

/// Outcome of a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedReply {
    /// Input was sensitive; nothing was recorded or requested.
    Refused(&'static str),
    /// The completion service produced this (trimmed) text.
    Completed(String),
    /// Generation failed; `error` holds the detail that was logged.
    Fallback { text: &'static str, error: String },
}

impl GeneratedReply {
    /// The text to send back to the user.
    pub fn text(&self) -> &str {
        match self {
            Self::Refused(text) => text,
            Self::Completed(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Composes requests from session history and records the exchange.
pub struct ResponseGenerator {
    store: Arc<SessionStore>,
    backend: Arc<dyn CompletionBackend>,
    params: CompletionParams,
}

impl ResponseGenerator {
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn CompletionBackend>,
        params: CompletionParams,
    ) -> Self {
        Self {
            store,
            backend,
            params,
        }
    }

    /// Generate a reply to `user_text` for `user_id`.
    ///
    /// The user turn is recorded before the upstream call, so it survives an
    /// upstream failure. The assistant turn is recorded only on success.
    pub async fn generate(&self, user_id: UserId, user_text: &str) -> GeneratedReply {
        if let Some(term) = safety::matched_term(user_text) {
            tracing::info!(user = %user_id, "refusing sensitive message");
            tracing::debug!(user = %user_id, term, "sensitive term matched");
            return GeneratedReply::Refused(REFUSAL_MESSAGE);
        }

        let messages = match self.build_messages(user_id, user_text) {
            Ok(messages) => messages,
            Err(e) => return fallback(user_id, e),
        };

        if let Err(e) = self.store.append(user_id, Role::User, user_text) {
            return fallback(user_id, e);
        }

        let text = match self.backend.complete(&messages, &self.params).await {
            Ok(raw) if raw.trim().is_empty() => {
                return fallback(user_id, CompletionError::EmptyResponse.into())
            }
            Ok(raw) => raw.trim().to_string(),
            Err(e) => return fallback(user_id, e.into()),
        };

        if let Err(e) = self.store.append(user_id, Role::Assistant, text.as_str()) {
            // The reply is still worth sending; only the history is short.
            tracing::warn!(user = %user_id, error = %e, "failed to record assistant turn");
        }

        GeneratedReply::Completed(text)
    }

    /// System instruction, then prior turns, then the new user turn.
    fn build_messages(&self, user_id: UserId, user_text: &str) -> crate::Result<Vec<Turn>> {
        let history = self.store.get(user_id)?;
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Turn::system(SYSTEM_PROMPT));
        messages.extend(history);
        messages.push(Turn::user(user_text));
        Ok(messages)
    }
}

fn fallback(user_id: UserId, error: RelayError) -> GeneratedReply {
    tracing::error!(user = %user_id, error = %error, "reply generation failed");
    GeneratedReply::Fallback {
        text: FALLBACK_MESSAGE,
        error: error.to_string(),
    }
}
