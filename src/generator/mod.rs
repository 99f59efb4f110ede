//! Safety-gated reply generation.

mod prompt;
mod responder;

pub use prompt::{
    FALLBACK_MESSAGE, PRECHECK_REFUSAL, PROMPT_FOR_TEXT, REFUSAL_MESSAGE, SYSTEM_PROMPT,
};
pub use responder::{GeneratedReply, ResponseGenerator};
