//! HTTP handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::HOST, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::types::{Update, WebhookResponse};
use crate::completion::{CompletionBackend, CompletionParams, OpenAiClient};
use crate::config::Config;
use crate::dispatch::{Messenger, NotificationDispatcher, TelegramClient};
use crate::error::RelayError;
use crate::generator::{ResponseGenerator, PROMPT_FOR_TEXT};
use crate::session::SessionStore;
use crate::worker::{PoolConfig, ReplyJob, ReplyPipeline, ReplyPool};

/// Header carrying the secret registered with `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Tunables for [`AppState::new`].
#[derive(Debug, Clone, Default)]
pub struct StateOptions {
    pub params: CompletionParams,
    pub pool: PoolConfig,
    /// Public URL override for `/set_webhook`.
    pub public_base_url: Option<String>,
    /// Secret required on `/webhook` requests, when set.
    pub webhook_secret: Option<String>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub dispatcher: NotificationDispatcher,
    pub pool: ReplyPool,
    public_base_url: Option<Arc<str>>,
    webhook_secret: Option<Arc<str>>,
}

impl AppState {
    /// Wire the components together and start the reply workers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        messenger: Arc<dyn Messenger>,
        options: StateOptions,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let dispatcher = NotificationDispatcher::new(messenger);
        let generator = Arc::new(ResponseGenerator::new(
            Arc::clone(&store),
            backend,
            options.params,
        ));
        let pipeline = Arc::new(ReplyPipeline::new(generator, dispatcher.clone()));
        let pool = ReplyPool::start(pipeline, options.pool);

        Self {
            store,
            dispatcher,
            pool,
            public_base_url: options.public_base_url.map(Arc::from),
            webhook_secret: options
                .webhook_secret
                .filter(|s| !s.is_empty())
                .map(Arc::from),
        }
    }

    /// Build the production clients from configuration.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        config.validate()?;
        let bot_token = config.bot_token().unwrap_or_default();
        let api_key = config.api_key().unwrap_or_default();

        let backend = OpenAiClient::new(
            api_key,
            &config.completion.base_url,
            config.completion_timeout(),
        )?;
        let messenger = TelegramClient::new(bot_token, &config.telegram.api_base)?
            .with_send_timeout(config.send_timeout());

        Ok(Self::new(
            Arc::new(backend),
            Arc::new(messenger),
            StateOptions {
                params: config.completion_params(),
                pool: config.pool_config(),
                public_base_url: config.telegram.public_base_url.clone(),
                webhook_secret: config.telegram.webhook_secret.clone(),
            },
        ))
    }

    fn secret_matches(&self, headers: &HeaderMap) -> bool {
        match &self.webhook_secret {
            None => true,
            Some(expected) => headers
                .get(SECRET_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|given| given == expected.as_ref()),
        }
    }
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Inbound update from the messaging platform.
///
/// Text messages are queued for a background reply and acknowledged at once.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<WebhookResponse>) {
    if !state.secret_matches(&headers) {
        tracing::warn!("webhook call with missing or wrong secret token");
        return (StatusCode::UNAUTHORIZED, Json(WebhookResponse::unauthorized()));
    }

    let Some(update) = Update::parse(&body) else {
        tracing::warn!(bytes = body.len(), "rejecting malformed webhook payload");
        return (StatusCode::BAD_REQUEST, Json(WebhookResponse::no_json()));
    };

    let Some(message) = update.message else {
        tracing::debug!(update_id = ?update.update_id, "ignoring non-message update");
        return (StatusCode::OK, Json(WebhookResponse::ok()));
    };

    let Some(text) = message.text() else {
        state
            .dispatcher
            .deliver(message.chat.id, PROMPT_FOR_TEXT)
            .await;
        return (StatusCode::OK, Json(WebhookResponse::ok()));
    };

    let job = ReplyJob::new(message.chat.id, message.from.id, text);
    match state.pool.submit(job) {
        Ok(()) => (StatusCode::OK, Json(WebhookResponse::ok())),
        Err(e @ (RelayError::QueueFull | RelayError::QueueClosed)) => {
            tracing::warn!(error = %e, "reply job not accepted");
            (StatusCode::SERVICE_UNAVAILABLE, Json(WebhookResponse::busy()))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to queue reply job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse::error("internal error")),
            )
        }
    }
}

/// Register `<base>/webhook` with the platform and return its raw reply.
pub async fn set_webhook(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let base = match state.public_base_url.as_deref() {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => match request_base_url(&headers) {
            Some(base) => base,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(WebhookResponse::error("no base url")),
                )
                    .into_response()
            }
        },
    };
    let webhook_url = format!("{}/webhook", base);

    tracing::info!(url = %webhook_url, "registering webhook");

    match state
        .dispatcher
        .messenger()
        .set_webhook(&webhook_url, state.webhook_secret.as_deref())
        .await
    {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "webhook registration failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(WebhookResponse::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Base URL as seen by the client, from `Host` and `X-Forwarded-Proto`.
fn request_base_url(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(HOST)?.to_str().ok()?;
    if host.is_empty() {
        return None;
    }
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    Some(format!("{}://{}", scheme, host))
}
