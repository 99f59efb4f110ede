//! Conversation session management.
//!
//! This module provides the per-user conversation history: identifier
//! types, the turn model, and the bounded store that owns every session.

mod id;
mod store;
mod turn;

pub use id::{ChatId, UserId};
pub use store::{SessionStore, MAX_HISTORY};
pub use turn::{Role, Turn};
