//! HTTP surface for yalda-relay.
//!
//! ## Endpoints
//!
//! - `GET /healthz` - Liveness probe, answers `ok`
//! - `POST /webhook` - Inbound updates from the messaging platform
//! - `GET /set_webhook` - Register this server's `/webhook` with the platform
//!
//! ## Example
//!
//! ```no_run
//! use yalda_relay::api::{serve, AppState, ServerConfig};
//! use yalda_relay::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> yalda_relay::Result<()> {
//!     let mut config = Config::default();
//!     config.apply_env();
//!     let state = AppState::from_config(&config)?;
//!     serve(ServerConfig::new("127.0.0.1", 5000), state).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::{AppState, StateOptions, SECRET_TOKEN_HEADER};
pub use router::{create_router, serve, ServerConfig};
pub use types::{Update, WebhookResponse};
