//! "Document omitted" markers.
//!
//! Exports made without media replace shared documents with a line like
//! `report.pdf • 13 pages document omitted`. Such lines are classified as
//! documents even when the dialect's attachment marker matched too.

use once_cell::sync::Lazy;
use regex::Regex;

use super::strip_direction_marks;

/// File extensions recognized in document-omitted markers.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "zip", "rar",
];

static DOCUMENT_OMITTED: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)^(.+\.(?:{}))\s*•\s*(.+)\s*document omitted$",
        DOCUMENT_EXTENSIONS.join("|")
    );
    Regex::new(&pattern).expect("document-omitted pattern is valid")
});

/// Returns the document file name if `body` is a document-omitted marker.
///
/// # Example
///
/// ```rust
/// use chatview::parsing::document_omitted;
///
/// assert_eq!(
///     document_omitted("Quarterly report.pdf • 13 pages document omitted"),
///     Some("Quarterly report.pdf".to_string())
/// );
/// assert_eq!(document_omitted("photo.jpg • 1 page document omitted"), None);
/// ```
pub fn document_omitted(body: &str) -> Option<String> {
    let caps = DOCUMENT_OMITTED.captures(body)?;
    let name = strip_direction_marks(caps.get(1)?.as_str());
    Some(name.trim().to_string())
}
