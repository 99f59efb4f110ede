//! Session storage and management.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Role, Turn, UserId};
use crate::error::RelayError;
use crate::Result;

/// Maximum number of turns retained per session.
pub const MAX_HISTORY: usize = 12;

/// The bounded conversation history of one user, oldest turn first.
#[derive(Debug, Default)]
struct Session {
    turns: Vec<Turn>,
}

impl Session {
    /// Append a turn, dropping the oldest ones beyond `capacity`.
    fn push(&mut self, turn: Turn, capacity: usize) {
        self.turns.push(turn);
        if self.turns.len() > capacity {
            let excess = self.turns.len() - capacity;
            self.turns.drain(..excess);
        }
    }
}

/// Thread-safe storage for every user's session.
///
/// Sessions are created on first append and live for the lifetime of the
/// store. Each append holds the write lock for the whole push-and-trim, so
/// concurrent appends for one user never lose a turn or exceed the cap.
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Session>>,
    capacity: usize,
}

impl SessionStore {
    /// Create a new empty store capped at [`MAX_HISTORY`] turns per user.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Create a store with a custom per-session cap.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Per-session turn cap.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a turn to the user's session, creating it if absent.
    pub fn append(&self, user_id: UserId, role: Role, content: impl Into<String>) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RelayError::LockPoisoned)?;

        sessions
            .entry(user_id)
            .or_default()
            .push(Turn::new(role, content), self.capacity);
        Ok(())
    }

    /// Get a snapshot of the user's turns, oldest first.
    ///
    /// Returns an empty list for unknown users.
    pub fn get(&self, user_id: UserId) -> Result<Vec<Turn>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RelayError::LockPoisoned)?;
        Ok(sessions
            .get(&user_id)
            .map(|s| s.turns.clone())
            .unwrap_or_default())
    }

    /// Number of turns currently held for the user.
    pub fn len(&self, user_id: UserId) -> usize {
        self.sessions
            .read()
            .map(|s| s.get(&user_id).map_or(0, |session| session.turns.len()))
            .unwrap_or(0)
    }

    /// Drop the user's history. Returns whether a session existed.
    pub fn clear(&self, user_id: UserId) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RelayError::LockPoisoned)?;
        Ok(sessions.remove(&user_id).is_some())
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
