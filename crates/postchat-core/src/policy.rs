//! Mode-specific post-processing of completion text.
//!
//! In strict mode the model is told to answer `NO_ANSWER` when the posts
//! do not cover the question. That token is never shown to the end user:
//! it is replaced by [`STRICT_REFUSAL_MESSAGE`].
//!
//! Matching trims, uppercases, and then checks for the token as a prefix.
//! The prefix rule also matches longer words such as `NO_ANSWERABLE`.

use crate::mode::Mode;

/// Sentinel the strict prompt asks the model to emit.
pub const REFUSAL_TOKEN: &str = "NO_ANSWER";

/// Shown instead of the refusal token.
pub const STRICT_REFUSAL_MESSAGE: &str =
    "לא הצלחתי למצוא מידע מתאים באתר, תרצה שאבדוק לך במקורות אחרים?";

/// True when `text` is the refusal token, optionally followed by more text.
pub fn is_refusal(text: &str) -> bool {
    text.trim().to_uppercase().starts_with(REFUSAL_TOKEN)
}

/// Apply the response policy for `mode` to the raw completion text.
pub fn apply_policy(mode: Mode, raw: String) -> String {
    match mode {
        Mode::Dynamic => raw,
        Mode::Strict if is_refusal(&raw) => STRICT_REFUSAL_MESSAGE.to_string(),
        Mode::Strict => raw,
    }
}
