//! Unified error types for chatview.
//!
//! Parsing a transcript never fails: unknown lines degrade to continuation
//! lines. Errors only come from the edges of the library: reading files,
//! locating a transcript inside a dropped folder, invalid user configuration
//! and writing exports.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatview operations.
///
/// # Example
///
/// ```rust
/// use chatview::error::Result;
/// use chatview::Message;
///
/// fn load() -> Result<Vec<Message>> {
///     Ok(chatview::parse("3/14/24, 9:05 PM - Alice: Hello there"))
/// }
/// # assert_eq!(load().unwrap().len(), 1);
/// ```
pub type Result<T> = std::result::Result<T, ChatviewError>;

/// The error type for all chatview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatviewError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No transcript file was found among the collected paths.
    ///
    /// The parser is never invoked in this case; the caller should tell the
    /// user to select the exported chat folder.
    #[error("No .{extension} chat file found in {}. Please make sure you selected the exported chat folder.", display_roots(roots))]
    MissingTranscript {
        /// The paths that were searched.
        roots: Vec<PathBuf>,
        /// The transcript extension that was looked for.
        extension: String,
    },

    /// A user-supplied system-message rule is not a valid regular expression.
    #[error("Invalid system rule '{name}': {source}")]
    InvalidPattern {
        /// Name of the offending rule
        name: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A value did not match any accepted format (e.g. unknown output extension).
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of value that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_roots(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        return "the selection".to_string();
    }
    roots
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatviewError {
    /// Creates a missing-transcript error for the searched paths.
    pub fn missing_transcript(roots: Vec<PathBuf>, extension: impl Into<String>) -> Self {
        ChatviewError::MissingTranscript {
            roots,
            extension: extension.into(),
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(name: impl Into<String>, source: regex::Error) -> Self {
        ChatviewError::InvalidPattern {
            name: name.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatviewError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatviewError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatviewError::Io(_))
    }

    /// Returns `true` if no transcript could be located.
    pub fn is_missing_transcript(&self) -> bool {
        matches!(self, ChatviewError::MissingTranscript { .. })
    }

    /// Returns `true` if a configured rule failed to compile.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ChatviewError::InvalidPattern { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatviewError::InvalidDate { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatviewError::InvalidFormat { .. })
    }
}
