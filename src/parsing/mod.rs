//! Building blocks of the transcript grammar.
//!
//! The [`parser`](crate::parser) state machine is assembled from these pieces:
//! - [`dialect`] - header grammars and their attachment markers
//! - [`system`] - system-notice phrase rules
//! - [`attachment`] - document-omitted markers
//! - [`call`] - call records

pub mod attachment;
pub mod call;
pub mod dialect;
pub mod system;

pub use attachment::{DOCUMENT_EXTENSIONS, document_omitted};
pub use call::{CALL_PHRASES, CallRecord, detect_call};
pub use dialect::{Dialect, HeaderMatch};
pub use system::{BUILTIN_SYSTEM_RULES, SystemRule, SystemRules};

/// Returns `true` for invisible bidirectional formatting characters:
/// LRM, RLM, ALM and the embedding/override/isolate controls.
pub fn is_direction_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{061C}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Removes every bidirectional formatting character from `text`.
///
/// # Example
///
/// ```rust
/// use chatview::parsing::strip_direction_marks;
///
/// assert_eq!(strip_direction_marks("\u{200E}Missed voice call"), "Missed voice call");
/// ```
pub fn strip_direction_marks(text: &str) -> String {
    text.chars().filter(|&c| !is_direction_mark(c)).collect()
}
