//! Platform identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a platform user, used to key conversation sessions.
///
/// Telegram user ids are signed 64-bit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-{}", self.0)
    }
}

/// Identifier of the chat a reply is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ChatId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
