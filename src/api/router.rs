//! API router configuration.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, set_webhook, webhook, AppState};

/// Create the API router with the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/webhook", post(webhook))
        .route("/set_webhook", get(set_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Stop accepting requests on Ctrl-C / SIGTERM and drain in-flight ones.
    pub graceful_shutdown: bool,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            graceful_shutdown: true,
        }
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 5000)
    }
}

/// Start the API server with the given state.
pub async fn serve(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let router = create_router(state);

    tracing::info!("Starting yalda-relay server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(crate::error::RelayError::Io)?;

    let server = axum::serve(listener, router);
    let result = if config.graceful_shutdown {
        server.with_graceful_shutdown(shutdown_signal()).await
    } else {
        server.await
    };

    result.map_err(crate::error::RelayError::Io)?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
