//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::core::models::{OutputConfig, iso_timestamp};
use crate::error::Result;

const COLUMNS: [&str; 7] = ["Date", "Time", "Sender", "Type", "Content", "Attachment", "IsMe"];

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, `Time`, `Sender`, `Type`, `Content`, `Attachment`, `IsMe`
/// - With timestamps: a leading `Timestamp` column
/// - Encoding: UTF-8
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv(messages: &[Message], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(COLUMNS.len() + 1);
    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.extend(COLUMNS);
    header
}

fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::with_capacity(COLUMNS.len() + 1);
    if config.include_timestamps {
        record.push(iso_timestamp(msg).unwrap_or_default());
    }
    record.push(msg.date.clone());
    record.push(msg.time.clone());
    record.push(msg.sender.clone());
    record.push(msg.kind.as_str().to_string());
    record.push(msg.content.clone());
    record.push(msg.attachment_name().unwrap_or_default().to_string());
    record.push(msg.is_me.to_string());
    record
}
