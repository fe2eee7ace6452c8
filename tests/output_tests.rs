//! Output writer tests across all formats.

use std::fs;

use chatview::config::RenderConfig;
use chatview::core::OutputConfig;
use chatview::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use chatview::format::{OutputFormat, to_format_string, write_to_format};
use chatview::{FileMap, Message, parse};
use tempfile::tempdir;

const CHAT: &str = "\
3/14/24, 9:00 PM - Messages and calls are end-to-end encrypted
3/14/24, 9:05 PM - Alice: Hello; \"world\"
second line
3/14/24, 9:06 PM - You: IMG-0001.jpg (file attached)
3/14/24, 9:07 PM - Bob: Missed video call
3/14/24, 9:08 PM - Bob: plan.pdf • 2 pages document omitted";

fn messages() -> Vec<Message> {
    parse(CHAT)
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_reads_back_with_csv_reader() {
    let csv = to_csv(&messages(), &OutputConfig::new()).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Date", "Time", "Sender", "Type", "Content", "Attachment", "IsMe"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][2], "System");
    assert_eq!(&rows[1][4], "Hello; \"world\"\nsecond line");
    assert_eq!(&rows[2][5], "IMG-0001.jpg");
    assert_eq!(&rows[2][6], "true");
    assert_eq!(&rows[3][3], "call");
    assert_eq!(&rows[4][3], "document");
    assert_eq!(&rows[4][5], "plan.pdf");
}

#[test]
fn test_csv_timestamp_column() {
    let csv = to_csv(&messages(), &OutputConfig::new().with_timestamps()).unwrap();
    let first_row = csv.lines().nth(1).unwrap();
    assert!(first_row.starts_with("2024-03-14T21:00:00;3/14/24;9:00 PM;System;system;"));
}

#[test]
fn test_csv_uninterpretable_date_leaves_timestamp_empty() {
    let msg = Message::new("someday", "9:00 PM", "Alice", "hi", chatview::MessageKind::User);
    let csv = to_csv(&[msg], &OutputConfig::new().with_timestamps()).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with(";someday;"));
}

// ============================================================================
// JSON / JSONL
// ============================================================================

#[test]
fn test_json_shape() {
    let json = to_json(&messages(), &OutputConfig::new()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 5);

    assert_eq!(array[0]["sender"], "System");
    assert_eq!(array[0]["type"], "system");
    assert_eq!(array[2]["isMe"], true);
    assert_eq!(array[2]["attachmentName"], "IMG-0001.jpg");
    assert_eq!(array[3]["callType"], "Missed video call");
    assert!(array[1].get("attachmentName").is_none());
    assert!(array[1].get("callType").is_none());
}

#[test]
fn test_jsonl_lines_parse_back_into_messages() {
    let jsonl = to_jsonl(&messages(), &OutputConfig::new().with_timestamps()).unwrap();
    let back: Vec<Message> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(back, messages());
}

#[test]
fn test_file_writers() {
    let dir = tempdir().unwrap();
    let config = OutputConfig::new();
    let msgs = messages();

    write_csv(&msgs, dir.path().join("out.csv"), &config).unwrap();
    write_json(&msgs, dir.path().join("out.json"), &config).unwrap();
    write_jsonl(&msgs, dir.path().join("out.jsonl"), &config).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("out.csv")).unwrap(), to_csv(&msgs, &config).unwrap());
    assert_eq!(fs::read_to_string(dir.path().join("out.json")).unwrap(), to_json(&msgs, &config).unwrap());
    assert_eq!(fs::read_to_string(dir.path().join("out.jsonl")).unwrap(), to_jsonl(&msgs, &config).unwrap());
}

#[test]
fn test_writer_into_missing_directory_is_io_error() {
    let err = write_json(&messages(), "/definitely/not/here/out.json", &OutputConfig::new()).unwrap_err();
    assert!(err.is_io());
}

// ============================================================================
// Format dispatch
// ============================================================================

#[test]
fn test_write_every_format() {
    let dir = tempdir().unwrap();
    let msgs = messages();
    let files: FileMap = [("IMG-0001.jpg", "media/IMG-0001.jpg")].into_iter().collect();
    let config = OutputConfig::new();

    for format in OutputFormat::all() {
        let path = dir.path().join(format!("chat.{}", format.extension()));
        write_to_format(&msgs, &files, &path, *format, &config).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_format_string(&msgs, &files, *format, &config).unwrap());
        assert!(!written.is_empty(), "{format} produced nothing");
    }
}

#[test]
fn test_rendered_formats_resolve_files() {
    let msgs = messages();
    let files: FileMap = [("IMG-0001.jpg", "media/IMG-0001.jpg")].into_iter().collect();
    let config = OutputConfig::new();

    let html = to_format_string(&msgs, &files, OutputFormat::Html, &config).unwrap();
    assert!(html.contains("<img src=\"media/IMG-0001.jpg\""));

    let text = to_format_string(&msgs, &files, OutputFormat::Text, &config).unwrap();
    assert!(text.contains("[image: media/IMG-0001.jpg]"));

    let text = to_format_string(&msgs, &FileMap::new(), OutputFormat::Text, &config).unwrap();
    assert!(text.contains("📷 IMG-0001.jpg"));
}

#[test]
fn test_render_settings_flow_through_output_config() {
    let config = OutputConfig::new().with_render(RenderConfig::new().with_24_hour(true).with_dates(false));
    let text = to_format_string(&messages(), &FileMap::new(), OutputFormat::Text, &config).unwrap();

    assert!(text.contains("[21:05] Alice:"));
    assert!(!text.contains("--- 3/14/24 ---"));
}

#[test]
fn test_html_escapes_content() {
    let msgs = parse("3/14/24, 9:05 PM - <script>: <img onerror=x> & \"quotes\"");
    let html = to_format_string(&msgs, &FileMap::new(), OutputFormat::Html, &OutputConfig::new()).unwrap();

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img onerror"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; &quot;quotes&quot;"));
}
