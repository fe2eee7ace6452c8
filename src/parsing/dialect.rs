//! Header grammars of the two known export dialects.
//!
//! WhatsApp writes a different line prefix depending on the platform and
//! the kind of chat that was exported:
//! - Group (Android style): `3/14/24, 9:05 PM - Sender: Message`
//! - Bracketed (iOS style): `[05/03/2024, 14:02:10] Sender: Message`
//!
//! Each dialect also marks attachments differently, so the dialect detected
//! on the header line is carried along to attachment detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::strip_direction_marks;

// Exports may start a line with a byte-order mark or an LTR/RTL mark.
static GROUP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\u{FEFF}\u{200E}\u{200F}]*([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),\s([0-9]{1,2}:[0-9]{2}\s?[AP]M)\s-\s",
    )
    .expect("group header pattern is valid")
});

static BRACKETED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\u{FEFF}\u{200E}\u{200F}]*\[([0-9]{2}/[0-9]{2}/[0-9]{4}),\s([0-9]{2}:[0-9]{2}:[0-9]{2})\]\s",
    )
    .expect("bracketed header pattern is valid")
});

static GROUP_ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*) \(file attached\)").expect("group attachment pattern is valid"));

static BRACKETED_ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<attached:\s*(.*)>").expect("bracketed attachment pattern is valid"));

/// One of the two recognized transcript grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `M/D/YY, H:MM AM - ` prefix, attachments as `NAME (file attached)`.
    #[default]
    Group,
    /// `[DD/MM/YYYY, HH:MM:SS] ` prefix, attachments as `<attached: NAME>`.
    Bracketed,
}

/// A recognized header line, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Grammar that matched.
    pub dialect: Dialect,
    /// Raw date text, e.g. `3/14/24`.
    pub date: &'a str,
    /// Raw time text, e.g. `9:05 PM` or `14:02:10`.
    pub time: &'a str,
    /// Everything after the header prefix.
    pub rest: &'a str,
}

impl Dialect {
    /// All dialects in matching priority order.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Group, Dialect::Bracketed]
    }

    fn header_regex(self) -> &'static Regex {
        match self {
            Dialect::Group => &GROUP_HEADER,
            Dialect::Bracketed => &BRACKETED_HEADER,
        }
    }

    fn attachment_regex(self) -> &'static Regex {
        match self {
            Dialect::Group => &GROUP_ATTACHMENT,
            Dialect::Bracketed => &BRACKETED_ATTACHMENT,
        }
    }

    /// Tries every dialect in priority order against a single line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatview::parsing::Dialect;
    ///
    /// let header = Dialect::match_header("[05/03/2024, 14:02:10] Bob: hi").unwrap();
    /// assert_eq!(header.dialect, Dialect::Bracketed);
    /// assert_eq!(header.date, "05/03/2024");
    /// assert_eq!(header.rest, "Bob: hi");
    /// ```
    pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
        Dialect::all()
            .iter()
            .find_map(|&dialect| dialect.match_line(line))
    }

    /// Matches a line against this dialect only.
    pub fn match_line(self, line: &str) -> Option<HeaderMatch<'_>> {
        let caps = self.header_regex().captures(line)?;
        let prefix = caps.get(0)?;
        Some(HeaderMatch {
            dialect: self,
            date: caps.get(1).map_or("", |m| m.as_str()),
            time: caps.get(2).map_or("", |m| m.as_str()),
            rest: &line[prefix.end()..],
        })
    }

    /// Extracts the attachment file name from a message body, if the body
    /// carries this dialect's attachment marker.
    pub fn attachment_name(self, body: &str) -> Option<String> {
        let caps = self.attachment_regex().captures(body)?;
        let name = strip_direction_marks(caps.get(1)?.as_str());
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }

    /// Returns the lowercase name used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Group => "group",
            Dialect::Bracketed => "bracketed",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_header() {
        let header = Dialect::match_header("3/14/24, 9:05 PM - Alice: Hello there").unwrap();
        assert_eq!(header.dialect, Dialect::Group);
        assert_eq!(header.date, "3/14/24");
        assert_eq!(header.time, "9:05 PM");
        assert_eq!(header.rest, "Alice: Hello there");
    }

    #[test]
    fn test_group_header_four_digit_year_no_space_meridiem() {
        let header = Dialect::match_header("12/31/2023, 11:59PM - Bob: late").unwrap();
        assert_eq!(header.date, "12/31/2023");
        assert_eq!(header.time, "11:59PM");
    }

    #[test]
    fn test_group_header_narrow_space_before_meridiem() {
        let header = Dialect::match_header("1/2/24, 7:00\u{202F}AM - Bob: early").unwrap();
        assert_eq!(header.time, "7:00\u{202F}AM");
        assert_eq!(header.rest, "Bob: early");
    }

    #[test]
    fn test_bracketed_header() {
        let header =
            Dialect::match_header("[05/03/2024, 14:02:10] Bob: <attached: photo.jpg>").unwrap();
        assert_eq!(header.dialect, Dialect::Bracketed);
        assert_eq!(header.date, "05/03/2024");
        assert_eq!(header.time, "14:02:10");
        assert_eq!(header.rest, "Bob: <attached: photo.jpg>");
    }

    #[test]
    fn test_leading_marks_do_not_block_headers() {
        assert!(Dialect::match_header("\u{200E}3/14/24, 9:05 PM - Alice: hi").is_some());
        assert!(Dialect::match_header("\u{200F}3/14/24, 9:05 PM - Alice: hi").is_some());
        assert!(Dialect::match_header("\u{FEFF}[05/03/2024, 14:02:10] Bob: hi").is_some());
        assert!(Dialect::match_header("\u{FEFF}\u{200E}[05/03/2024, 14:02:10] Bob: hi").is_some());
    }

    #[test]
    fn test_non_headers() {
        assert!(Dialect::match_header("").is_none());
        assert!(Dialect::match_header("just some text").is_none());
        // 24-hour clock is not the group grammar
        assert!(Dialect::match_header("3/14/24, 21:05 - Alice: hi").is_none());
        // bracketed requires two-digit components and seconds
        assert!(Dialect::match_header("[5/3/2024, 14:02:10] Bob: hi").is_none());
        assert!(Dialect::match_header("[05/03/2024, 14:02] Bob: hi").is_none());
        // header must start the line
        assert!(Dialect::match_header("quoted: 3/14/24, 9:05 PM - Alice: hi").is_none());
    }

    #[test]
    fn test_group_attachment() {
        assert_eq!(
            Dialect::Group.attachment_name("IMG-20240314-WA0001.jpg (file attached)"),
            Some("IMG-20240314-WA0001.jpg".to_string())
        );
        assert_eq!(Dialect::Group.attachment_name("<attached: photo.jpg>"), None);
    }

    #[test]
    fn test_bracketed_attachment() {
        assert_eq!(
            Dialect::Bracketed.attachment_name("\u{200E}<attached: 00000012-PHOTO.jpg>"),
            Some("00000012-PHOTO.jpg".to_string())
        );
        assert_eq!(
            Dialect::Bracketed.attachment_name("photo.jpg (file attached)"),
            None
        );
    }

    #[test]
    fn test_empty_attachment_name_is_ignored() {
        assert_eq!(Dialect::Bracketed.attachment_name("<attached: >"), None);
    }

    #[test]
    fn test_dialect_serde() {
        let json = serde_json::to_string(&Dialect::Bracketed).unwrap();
        assert_eq!(json, "\"bracketed\"");
        assert_eq!(Dialect::Group.to_string(), "group");
    }
}
