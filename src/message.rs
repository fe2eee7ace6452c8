//! Structured message records produced by the transcript parser.
//!
//! A [`Message`] keeps the raw `date` and `time` text exactly as it appeared
//! in the transcript; turning them into calendar values is left to callers
//! (see [`Message::timestamp`]) and display formatting to
//! [`format_time`](crate::time::format_time).
//!
//! # Examples
//!
//! ```
//! use chatview::{Message, MessageKind};
//!
//! let msg = Message::new("3/14/24", "9:05 PM", "Alice", "Hello there", MessageKind::User);
//! assert_eq!(msg.sender(), "Alice");
//! assert!(!msg.is_me);
//! ```
//!
//! ## Serialization
//!
//! Keys are camelCase and the kind is serialized as `type`:
//!
//! ```
//! use chatview::{Message, MessageKind};
//!
//! let msg = Message::new("3/14/24", "9:05 PM", "Bob", "IMG-1.jpg (file attached)", MessageKind::Image)
//!     .with_attachment("IMG-1.jpg");
//! let json = serde_json::to_string(&msg)?;
//!
//! assert!(json.contains(r#""type":"image""#));
//! assert!(json.contains(r#""attachmentName":"IMG-1.jpg""#));
//! assert!(!json.contains("callType"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::parsing::Dialect;
use crate::time::parse_clock;

/// Sender value used for every system notice.
pub const SYSTEM_SENDER: &str = "System";

/// Semantic kind of a message. Set once at classification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Group/administrative notice without an individual sender.
    System,
    /// Plain text message.
    #[default]
    User,
    /// Any attached file (images and other files share this bucket).
    Image,
    /// A document that was omitted from the export.
    Document,
    /// A voice or video call record.
    Call,
}

impl MessageKind {
    /// Returns the lowercase name used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::System => "system",
            MessageKind::User => "user",
            MessageKind::Image => "image",
            MessageKind::Document => "document",
            MessageKind::Call => "call",
        }
    }

    /// Returns all kinds.
    pub fn all() -> &'static [MessageKind] {
        &[
            MessageKind::System,
            MessageKind::User,
            MessageKind::Image,
            MessageKind::Document,
            MessageKind::Call,
        ]
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageKind::System),
            "user" | "text" => Ok(MessageKind::User),
            "image" | "attachment" => Ok(MessageKind::Image),
            "document" | "doc" => Ok(MessageKind::Document),
            "call" => Ok(MessageKind::Call),
            _ => Err(format!(
                "Unknown message type: '{}'. Expected one of: system, user, image, document, call",
                s
            )),
        }
    }
}

/// One logical message of a transcript.
///
/// | Field | Populated for |
/// |-------|---------------|
/// | `attachment_name` | `image`, `document` |
/// | `call_type`, `detail` | `call` |
///
/// The parser only builds messages through the constructors below, which
/// keep that table true. `content` is the only field that grows after
/// creation: continuation lines are appended to it until the next header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Raw date text, e.g. `3/14/24` or `05/03/2024`.
    pub date: String,

    /// Raw time text, e.g. `9:05 PM` or `14:02:10`.
    pub time: String,

    /// Sender name, or [`SYSTEM_SENDER`] for system notices.
    pub sender: String,

    /// Message body. Multi-line messages are joined with `\n`.
    pub content: String,

    /// Semantic kind.
    #[serde(rename = "type")]
    pub kind: MessageKind,

    /// Whether the sender is one of the configured self identifiers.
    pub is_me: bool,

    /// File name referenced by an attachment or omitted document.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment_name: Option<String>,

    /// Call action phrase, e.g. `Missed video call`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub call_type: Option<String>,

    /// Trailing call clause such as `28 min`; empty when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub detail: Option<String>,

    /// Header grammar the message was read with.
    #[serde(default)]
    pub dialect: Dialect,
}

impl Message {
    /// Creates a message without attachment or call fields.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            content: content.into(),
            kind,
            is_me: false,
            attachment_name: None,
            call_type: None,
            detail: None,
            dialect: Dialect::default(),
        }
    }

    /// Creates a system notice.
    pub fn system(
        date: impl Into<String>,
        time: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(date, time, SYSTEM_SENDER, content, MessageKind::System)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the attachment file name.
    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachment_name = Some(name.into());
        self
    }

    /// Turns the message into a call record.
    ///
    /// The call phrase also becomes the content, and any attachment is
    /// dropped.
    #[must_use]
    pub fn with_call(mut self, call_type: impl Into<String>, detail: impl Into<String>) -> Self {
        let call_type = call_type.into();
        self.kind = MessageKind::Call;
        self.content.clone_from(&call_type);
        self.call_type = Some(call_type);
        self.detail = Some(detail.into());
        self.attachment_name = None;
        self
    }

    /// Sets whether the message was written by the viewing user.
    #[must_use]
    pub fn with_is_me(mut self, is_me: bool) -> Self {
        self.is_me = is_me;
        self
    }

    /// Sets the dialect the message was read with.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the attachment name, if any.
    pub fn attachment_name(&self) -> Option<&str> {
        self.attachment_name.as_deref()
    }

    /// Returns the call action phrase, if this is a call.
    pub fn call_type(&self) -> Option<&str> {
        self.call_type.as_deref()
    }

    /// Returns the call detail clause, if this is a call.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` for system notices.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Returns `true` if the message references a file.
    pub fn has_attachment(&self) -> bool {
        self.attachment_name.is_some()
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }

    /// Best-effort calendar interpretation of the raw date and time.
    ///
    /// Group dates are read month-first, falling back to day-first when that
    /// fails; bracketed dates are day-first. Returns `None` when either part
    /// cannot be interpreted.
    ///
    /// ```
    /// use chatview::parse;
    /// use chrono::NaiveDate;
    ///
    /// let msgs = parse("[05/03/2024, 14:02:10] Bob: hi");
    /// let ts = msgs[0].timestamp().unwrap();
    /// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    /// ```
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = parse_date(&self.date, self.dialect)?;
        let time = parse_clock(&self.time)?;
        Some(date.and_time(time))
    }
}

fn parse_date(raw: &str, dialect: Dialect) -> Option<NaiveDate> {
    let formats: &[&str] = match dialect {
        Dialect::Group => &["%m/%d/%y", "%m/%d/%Y", "%d/%m/%y", "%d/%m/%Y"],
        Dialect::Bracketed => &["%d/%m/%Y", "%d/%m/%y"],
    };
    let raw = raw.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

impl Default for Message {
    fn default() -> Self {
        Self::new("", "", "", "", MessageKind::User)
    }
}
