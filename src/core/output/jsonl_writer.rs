//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, suited to line-oriented tooling and
//! incremental processing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

use super::json_writer::ExportedMessage;

/// Writes messages to a JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_jsonl(messages: &[Message], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        serde_json::to_writer(&mut writer, &ExportedMessage::new(msg, config))?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&ExportedMessage::new(msg, config))?);
        out.push('\n');
    }
    Ok(out)
}
