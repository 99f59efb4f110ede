//! Error types for yalda-relay.

use thiserror::Error;

use crate::completion::CompletionError;
use crate::config::ConfigError;
use crate::dispatch::DeliveryError;

/// Main error type for relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// The completion service call failed.
    #[error("completion service error: {0}")]
    Completion(#[from] CompletionError),

    /// Outbound delivery to the messaging platform failed.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// The reply queue has no free slot.
    #[error("reply queue is full")]
    QueueFull,

    /// The reply queue no longer has running workers.
    #[error("reply queue closed")]
    QueueClosed,

    /// Reply workers were still busy when the drain timeout elapsed.
    #[error("reply workers did not finish within {0:?}")]
    DrainTimeout(std::time::Duration),
}

/// Convenience Result type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
