//! The generate-and-reply sequence run for every text message.

use std::sync::Arc;

use crate::dispatch::NotificationDispatcher;
use crate::generator::{ResponseGenerator, PRECHECK_REFUSAL};
use crate::safety;
use crate::session::{ChatId, UserId};

/// One inbound text message awaiting a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyJob {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub text: String,
}

impl ReplyJob {
    pub fn new(chat_id: ChatId, user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            user_id,
            text: text.into(),
        }
    }
}

/// Generator plus dispatcher, shared by every worker.
pub struct ReplyPipeline {
    generator: Arc<ResponseGenerator>,
    dispatcher: NotificationDispatcher,
}

impl ReplyPipeline {
    pub fn new(generator: Arc<ResponseGenerator>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            generator,
            dispatcher,
        }
    }

    /// Run one job to completion. Never fails; every error is logged.
    pub async fn process(&self, job: ReplyJob) {
        // Fast reject; the generator repeats this check authoritatively.
        if safety::is_sensitive(&job.text) {
            tracing::info!(
                user = %job.user_id,
                chat_id = %job.chat_id,
                "sensitive message, sending refusal"
            );
            self.dispatcher.deliver(job.chat_id, PRECHECK_REFUSAL).await;
            return;
        }

        let reply = self.generator.generate(job.user_id, &job.text).await;
        tracing::debug!(user = %job.user_id, completed = reply.is_completed(), "reply ready");
        self.dispatcher.deliver(job.chat_id, reply.text()).await;
    }
}
