//! Edge-case tests for the transcript grammar.
//!
//! Covers the tolerant paths: garbage input, orphan lines, line endings,
//! invisible marks, near-miss headers and over-eager system phrases.

use chatview::parser::TranscriptParser;
use chatview::parsing::{Dialect, SystemRules};
use chatview::time::format_time;
use chatview::{MessageKind, parse};

// ============================================================================
// Total parsing
// ============================================================================

#[test]
fn test_empty_and_blank_input() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n\n").is_empty());
    assert!(parse("   ").is_empty());
}

#[test]
fn test_binary_garbage_does_not_panic() {
    let garbage = String::from_utf8_lossy(&[0xFF, 0xFE, 0x00, 0x01, b'\n', 0xC3, 0x28, b'\n']).into_owned();
    assert!(parse(&garbage).is_empty());
}

#[test]
fn test_lines_before_first_header_are_dropped() {
    let parser = TranscriptParser::new();
    let mut assembler = parser.assembler();
    assert!(assembler.push_line("exported from phone").is_none());
    assert!(assembler.push_line("").is_none());
    assert_eq!(assembler.discarded(), 2);
    assert!(!assembler.has_open_message());

    let messages = parse("preamble\n3/14/24, 9:05 PM - Alice: Hi");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hi");
}

#[test]
fn test_unterminated_final_message_is_sealed() {
    let messages = parse("3/14/24, 9:05 PM - Alice: line one\nline two");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "line one\nline two");
}

#[test]
fn test_blank_continuation_lines_are_kept() {
    let messages = parse("3/14/24, 9:05 PM - Alice: a\n\nb\n");
    assert_eq!(messages[0].content, "a\n\nb");
}

#[test]
fn test_crlf_line_endings() {
    let messages = parse("3/14/24, 9:05 PM - Alice: a\r\nb\r\n3/14/24, 9:06 PM - Bob: c\r\n");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "a\nb");
    assert_eq!(messages[1].content, "c");
}

#[test]
fn test_continuation_lines_are_verbatim() {
    let messages = parse("3/14/24, 9:05 PM - Alice: list\n  - indented\n\u{200E}marked");
    assert_eq!(messages[0].content, "list\n  - indented\n\u{200E}marked");
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_leading_marks_before_header() {
    for mark in ["\u{FEFF}", "\u{200E}", "\u{200F}", "\u{FEFF}\u{200E}"] {
        let line = format!("{mark}3/14/24, 9:05 PM - Alice: Hi");
        let messages = parse(&line);
        assert_eq!(messages.len(), 1, "mark {mark:?} blocked the header");
        assert_eq!(messages[0].date, "3/14/24");
    }
}

#[test]
fn test_group_header_variants() {
    let lines = [
        "1/2/24, 9:05 PM - A: x",
        "12/31/2024, 11:59 PM - A: x",
        "3/14/24, 9:05PM - A: x",
        "3/14/24, 9:05\u{202F}AM - A: x",
    ];
    for line in lines {
        let messages = parse(line);
        assert_eq!(messages.len(), 1, "{line}");
        assert_eq!(messages[0].dialect, Dialect::Group);
    }
}

#[test]
fn test_near_miss_headers_are_continuations() {
    let text = "\
3/14/24, 9:05 PM - Alice: start
3/14/24 9:06 PM - no comma
3/14/24, 21:06 - no meridiem
[5/3/2024, 14:02:10] short bracket digits
[05/03/2024, 14:02] no seconds
05/03/2024, 14:02:10] missing bracket
3/14/24, 9:07 PM-no spaces";
    let messages = parse(text);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content.lines().count(), 7);
}

#[test]
fn test_non_ascii_digits_are_not_headers() {
    let messages = parse("3/14/24, 9:05 PM - Alice: hi\n٣/١٤/٢٤, ٩:٠٥ PM - Bob: hi");
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_mixed_dialects_in_one_transcript() {
    let messages = parse("3/14/24, 9:05 PM - Alice: a\n[05/03/2024, 14:02:10] Bob: b");
    assert_eq!(messages[0].dialect, Dialect::Group);
    assert_eq!(messages[1].dialect, Dialect::Bracketed);
}

#[test]
fn test_header_with_empty_remainder_is_system() {
    let messages = parse("3/14/24, 9:05 PM - ");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, MessageKind::System);
    assert_eq!(messages[0].content, "");
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_sender_split_at_first_separator() {
    let messages = parse("3/14/24, 9:05 PM - Alice: note: remember: milk");
    assert_eq!(messages[0].sender, "Alice");
    assert_eq!(messages[0].content, "note: remember: milk");
}

#[test]
fn test_colon_without_space_is_not_a_sender() {
    let messages = parse("3/14/24, 9:05 PM - Alice:hello");
    assert_eq!(messages[0].kind, MessageKind::System);
    assert_eq!(messages[0].content, "Alice:hello");
}

#[test]
fn test_system_phrase_wins_over_sender() {
    let messages = parse("3/14/24, 9:05 PM - Alice: This message was deleted");
    assert_eq!(messages[0].kind, MessageKind::System);
    assert_eq!(messages[0].sender, "System");
    assert_eq!(messages[0].content, "Alice: This message was deleted");
}

#[test]
fn test_over_eager_membership_phrase() {
    // "added <something>" anywhere in the line marks a notice
    let messages = parse("3/14/24, 9:05 PM - Alice: I added sugar");
    assert_eq!(messages[0].kind, MessageKind::System);

    let rules = SystemRules::builtin();
    let matched = rules.matching_rules("Alice: I added sugar");
    assert!(matched.contains(&"added_someone"));
}

#[test]
fn test_system_rules_are_case_insensitive() {
    let messages = parse("3/14/24, 9:05 PM - Bob: <MEDIA OMITTED>");
    assert_eq!(messages[0].kind, MessageKind::System);
}

#[test]
fn test_system_messages_keep_direction_marks() {
    let messages = parse("3/14/24, 9:05 PM - \u{200E}Alice created this group");
    assert_eq!(messages[0].content, "\u{200E}Alice created this group");
}

#[test]
fn test_direction_marks_stripped_from_body() {
    let messages = parse("3/14/24, 9:05 PM - Alice: \u{200E}hello\u{200F}");
    assert_eq!(messages[0].content, "hello");
}

#[test]
fn test_attachment_name_is_trimmed() {
    let messages = parse("[05/03/2024, 14:02:10] Bob: <attached:   photo 1.jpg  >");
    assert_eq!(messages[0].attachment_name(), Some("photo 1.jpg"));
}

#[test]
fn test_any_attached_file_is_an_image() {
    let messages = parse("3/14/24, 9:05 PM - Alice: song.mp3 (file attached)");
    assert_eq!(messages[0].kind, MessageKind::Image);
    assert_eq!(messages[0].attachment_name(), Some("song.mp3"));
}

#[test]
fn test_attachment_markers_are_dialect_specific() {
    let messages = parse("3/14/24, 9:05 PM - Alice: <attached: photo.jpg>");
    assert_eq!(messages[0].kind, MessageKind::User);

    let messages = parse("[05/03/2024, 14:02:10] Bob: photo.jpg (file attached)");
    assert_eq!(messages[0].kind, MessageKind::User);
}

#[test]
fn test_document_omitted_overrides_attachment() {
    let messages = parse("[05/03/2024, 14:02:10] Bob: Report.DOCX • 12 pages document omitted");
    assert_eq!(messages[0].kind, MessageKind::Document);
    assert_eq!(messages[0].attachment_name(), Some("Report.DOCX"));

    let messages = parse("[05/03/2024, 14:02:10] Bob: clip.mp4 • 1 page document omitted");
    assert_eq!(messages[0].kind, MessageKind::User);
}

#[test]
fn test_call_phrase_at_start_of_body() {
    for (body, call_type) in [
        ("Video call tomorrow?", "Video call"),
        ("Missed voice call. Tap to call back", "Missed voice call"),
        ("Voice call 5 min", "Voice call"),
        ("\u{200E}Missed video call", "Missed video call"),
    ] {
        let messages = parse(&format!("3/14/24, 9:05 PM - Alice: {body}"));
        assert_eq!(messages[0].kind, MessageKind::Call, "{body}");
        assert_eq!(messages[0].call_type(), Some(call_type), "{body}");
        assert_eq!(messages[0].detail(), Some(""), "{body}");
        assert_eq!(messages[0].content, call_type);
    }

    let messages = parse("3/14/24, 9:05 PM - Alice: we had a video call");
    assert_eq!(messages[0].kind, MessageKind::User);
}

#[test]
fn test_call_continuation_lines_extend_content() {
    let messages = parse("3/14/24, 9:05 PM - Alice: Voice call, 2 min\nextra");
    assert_eq!(messages[0].kind, MessageKind::Call);
    assert_eq!(messages[0].content, "Voice call\nextra");
}

#[test]
fn test_is_me_is_case_insensitive_exact() {
    let messages = parse("3/14/24, 9:05 PM - YOU: a\n3/14/24, 9:06 PM - Youssef: b");
    assert!(messages[0].is_me);
    assert!(!messages[1].is_me);
}

// ============================================================================
// Time formatter
// ============================================================================

#[test]
fn test_format_time_unrecognized_is_unchanged() {
    assert_eq!(format_time("", true), "");
    assert_eq!(format_time("noon", false), "noon");
    assert_eq!(format_time("25:00", true), "25:00");
}

#[test]
fn test_format_time_round_trips() {
    for (h, expected) in [(0, "12:05 AM"), (11, "11:05 AM"), (12, "12:05 PM"), (13, "1:05 PM"), (23, "11:05 PM")] {
        let twenty_four = format!("{h:02}:05");
        assert_eq!(format_time(&twenty_four, false), expected);
        assert_eq!(format_time(expected, true), twenty_four);
    }
}
