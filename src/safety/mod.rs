//! Content safety screening.
//!
//! A coarse keyword heuristic applied to inbound user text before any of it
//! reaches the completion service or the conversation history.
//!
//! ## Example
//!
//! ```rust
//! use yalda_relay::safety::is_sensitive;
//!
//! assert!(is_sensitive("I feel SUICIDE today"));
//! assert!(!is_sensitive("hello, how are you"));
//! ```

mod filter;

pub use filter::{is_sensitive, matched_term, SENSITIVE_TERMS};
