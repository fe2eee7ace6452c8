//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::Message;
use crate::core::models::{OutputConfig, iso_timestamp};
use crate::error::Result;

/// A message as exported: every parsed field, plus an optional timestamp.
#[derive(Serialize)]
pub(super) struct ExportedMessage<'a> {
    #[serde(flatten)]
    message: &'a Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl<'a> ExportedMessage<'a> {
    pub(super) fn new(message: &'a Message, config: &OutputConfig) -> Self {
        Self {
            message,
            timestamp: if config.include_timestamps {
                iso_timestamp(message)
            } else {
                None
            },
        }
    }
}

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "3/14/24", "time": "9:05 PM", "sender": "Alice", "content": "Hello", "type": "user", "isMe": false, "dialect": "group"}
/// ]
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_json(messages: &[Message], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let exported: Vec<ExportedMessage<'_>> = messages
        .iter()
        .map(|m| ExportedMessage::new(m, config))
        .collect();
    Ok(serde_json::to_string_pretty(&exported)?)
}
