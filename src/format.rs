//! Output format selection.
//!
//! Library-first format types that don't depend on the CLI. Rendered
//! formats ([`Html`](OutputFormat::Html), [`Text`](OutputFormat::Text)) go
//! through [`ChatView`]; structured formats go through
//! [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatview::Result<()> {
//! use chatview::format::{OutputFormat, write_to_format};
//! use chatview::core::OutputConfig;
//! use chatview::FileMap;
//!
//! let messages = chatview::parse("3/14/24, 9:05 PM - Alice: Hello!");
//!
//! write_to_format(&messages, &FileMap::new(), "output.csv", OutputFormat::Csv, &OutputConfig::new())?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("output.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatviewError, Result};
use crate::files::FileMap;
use crate::render::{ChatView, to_text};

/// Output format for a converted transcript.
///
/// - [`Html`](OutputFormat::Html) - self-contained chat page (default)
/// - [`Text`](OutputFormat::Text) - the same view as plain text
/// - [`Json`](OutputFormat::Json) - structured array, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - one JSON per line
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table
///
/// ```rust
/// use chatview::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("ndjson").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
    Jsonl,
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["html", "text", "json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Html,
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Csv,
        ]
    }

    /// Returns `true` for formats produced from a [`ChatView`].
    pub fn is_rendered(&self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::Text)
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatview::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("chat.HTM").unwrap(), OutputFormat::Html);
    /// assert!(OutputFormat::from_path("chat.pdf").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatviewError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: html, txt, json, jsonl, csv"),
            )),
        }
    }

    fn required_feature(self) -> Option<&'static str> {
        match self {
            OutputFormat::Html if !cfg!(feature = "html") => Some("html"),
            OutputFormat::Json | OutputFormat::Jsonl if !cfg!(feature = "json-output") => Some("json-output"),
            OutputFormat::Csv if !cfg!(feature = "csv-output") => Some("csv-output"),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "HTML"),
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes messages to a file in the specified format.
///
/// `files` resolves attachment names for the rendered formats and is
/// ignored by the structured ones.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_to_format(
    messages: &[Message],
    files: &FileMap,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path, config),
        _ => {
            let rendered = to_format_string(messages, files, format, config)?;
            fs::write(path, rendered)?;
            Ok(())
        }
    }
}

/// Converts messages to a string in the specified format.
///
/// ```rust
/// use chatview::format::{OutputFormat, to_format_string};
/// use chatview::core::OutputConfig;
/// use chatview::FileMap;
///
/// let messages = chatview::parse("3/14/24, 9:05 PM - Alice: Hello!");
/// let text = to_format_string(&messages, &FileMap::new(), OutputFormat::Text, &OutputConfig::new()).unwrap();
/// assert!(text.contains("Alice: Hello!"));
/// ```
pub fn to_format_string(
    messages: &[Message],
    files: &FileMap,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    if let Some(feature) = format.required_feature() {
        return Err(ChatviewError::invalid_format(
            "output",
            format!("Output format {format} requires the '{feature}' feature to be enabled"),
        ));
    }

    match format {
        OutputFormat::Text => Ok(to_text(&ChatView::build(messages, files, &config.render))),
        #[cfg(feature = "html")]
        OutputFormat::Html => Ok(crate::render::to_html(
            &ChatView::build(messages, files, &config.render),
            &config.render,
        )),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(ChatviewError::invalid_format(
            "output",
            format!("Output format {format} is not available"),
        )),
    }
}
