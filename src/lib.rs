//! # yalda-relay
//!
//! Webhook relay between a Telegram bot and an LLM chat completion service.
//!
//! The platform posts each inbound message to `/webhook`. Text messages are
//! screened by a keyword safety filter, answered by a completion service
//! with the user's recent history as context, and the reply is sent back to
//! the originating chat, all off the request path.
//!
//! ## Features
//!
//! - **Bounded history**: the last [`MAX_HISTORY`] turns per user, in memory
//! - **Safety gate**: sensitive input never reaches the completion service
//! - **Bounded background work**: a fixed worker pool behind a bounded queue
//! - **Best-effort delivery**: platform errors are logged, never surfaced
//!
//! ## Quick Start
//!
//! ```no_run
//! use yalda_relay::{Role, SessionStore, UserId};
//!
//! let store = SessionStore::new();
//! store.append(UserId::new(42), Role::User, "salam").unwrap();
//! assert_eq!(store.get(UserId::new(42)).unwrap().len(), 1);
//! ```

pub mod api;
pub mod cli;
pub mod completion;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod logging;
pub mod safety;
pub mod session;
pub mod worker;

// Re-export commonly used types
pub use completion::{CompletionBackend, CompletionError, CompletionParams, OpenAiClient};
pub use dispatch::{DeliveryError, Messenger, NotificationDispatcher, TelegramClient};
pub use error::{RelayError, Result};
pub use generator::{GeneratedReply, ResponseGenerator};
pub use safety::is_sensitive;
pub use session::{ChatId, Role, SessionStore, Turn, UserId, MAX_HISTORY};
pub use worker::{PoolConfig, ReplyJob, ReplyPipeline, ReplyPool};
