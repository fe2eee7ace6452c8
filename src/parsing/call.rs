//! Call records (`Missed voice call`, `Video call, 12 min`, ...).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The fixed call-action phrases, longest first.
pub const CALL_PHRASES: &[&str] = &[
    "Missed voice call",
    "Missed video call",
    "Voice call",
    "Video call",
];

// Prefix match: anything after the phrase that is not a `, detail` clause
// is ignored.
static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Missed voice call|Missed video call|Voice call|Video call)(?:,\s*(.*))?")
        .expect("call pattern is valid")
});

/// A detected call record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// The action phrase, e.g. `Missed video call`.
    pub call_type: String,
    /// Trailing clause such as `28 min` or `Tap to call back`; empty if absent.
    pub detail: String,
}

impl CallRecord {
    /// Returns `true` for video calls.
    pub fn is_video(&self) -> bool {
        is_video_call(&self.call_type)
    }

    /// Returns `true` for missed calls.
    pub fn is_missed(&self) -> bool {
        is_missed_call(&self.call_type)
    }
}

/// Detects a call record at the start of a cleaned message body.
///
/// # Example
///
/// ```rust
/// use chatview::parsing::detect_call;
///
/// let call = detect_call("Video call, 28 min").unwrap();
/// assert_eq!(call.call_type, "Video call");
/// assert_eq!(call.detail, "28 min");
/// assert_eq!(detect_call("Video call tomorrow?").unwrap().call_type, "Video call");
/// assert!(detect_call("I missed your video call").is_none());
/// ```
pub fn detect_call(body: &str) -> Option<CallRecord> {
    let caps = CALL.captures(body)?;
    Some(CallRecord {
        call_type: caps.get(1)?.as_str().to_string(),
        detail: caps
            .get(2)
            .map_or(String::new(), |m| m.as_str().trim_end().to_string()),
    })
}

pub(crate) fn is_video_call(call_type: &str) -> bool {
    call_type.contains("Video") || call_type.contains("video")
}

pub(crate) fn is_missed_call(call_type: &str) -> bool {
    call_type.starts_with("Missed")
}
