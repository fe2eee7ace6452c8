//! The transcript parser.
//!
//! [`TranscriptParser`] turns transcript text into an ordered list of
//! [`Message`]s. It never fails on content: lines that match no header are
//! folded into the previous message, or dropped when no message is open.
//!
//! # Example
//!
//! ```rust
//! use chatview::parser::TranscriptParser;
//! use chatview::MessageKind;
//!
//! let text = "\
//! 3/14/24, 9:05 PM - Messages and calls are end-to-end encrypted
//! 3/14/24, 9:06 PM - Alice: Hello there
//! how are you?
//! 3/14/24, 9:07 PM - You: Missed video call";
//!
//! let parser = TranscriptParser::new();
//! let messages = parser.parse_str(text);
//!
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[0].kind, MessageKind::System);
//! assert_eq!(messages[1].content, "Hello there\nhow are you?");
//! assert_eq!(messages[2].kind, MessageKind::Call);
//! assert!(messages[2].is_me);
//! ```
//!
//! The same state machine is available line by line through
//! [`LineAssembler`], which is what [`TranscriptParser::stream`] uses.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::Message;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::message::MessageKind;
use crate::parsing::{
    Dialect, HeaderMatch, SystemRules, detect_call, document_omitted, strip_direction_marks,
};

#[cfg(feature = "streaming")]
use std::fs::File;
#[cfg(feature = "streaming")]
use std::io::{BufRead, BufReader};

#[cfg(feature = "streaming")]
use crate::streaming::{MessageStream, StreamingConfig};

/// Parser for exported chat transcripts.
///
/// Holds the compiled system rules and self identifiers; construct it once
/// and reuse it for any number of transcripts.
///
/// # Example
///
/// ```rust
/// use chatview::config::ParserConfig;
/// use chatview::parser::TranscriptParser;
///
/// let parser = TranscriptParser::with_config(
///     ParserConfig::new().with_self_identifiers(["Adisu"]),
/// )?;
/// let messages = parser.parse_str("[05/03/2024, 14:02:10] adisu: <attached: photo.jpg>");
///
/// assert!(messages[0].is_me);
/// assert_eq!(messages[0].attachment_name(), Some("photo.jpg"));
/// # Ok::<(), chatview::ChatviewError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: ParserConfig,
    system: SystemRules,
    self_ids: Vec<String>,
}

impl TranscriptParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        let self_ids = lowercase_all(&config.self_identifiers);
        Self {
            config,
            system: SystemRules::builtin(),
            self_ids,
        }
    }

    /// Creates a parser with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidPattern`](crate::ChatviewError::InvalidPattern)
    /// if one of the extra system rules is not a valid regular expression.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let base = if config.builtin_system_rules {
            SystemRules::builtin()
        } else {
            SystemRules::empty()
        };
        let system = base.extended(config.extra_system_rules.clone())?;
        let self_ids = lowercase_all(&config.self_identifiers);

        debug!(
            rules = system.len(),
            self_identifiers = self_ids.len(),
            "transcript parser configured"
        );

        Ok(Self {
            config,
            system,
            self_ids,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the compiled system rules.
    pub fn system_rules(&self) -> &SystemRules {
        &self.system
    }

    /// Parses a whole transcript held in memory.
    ///
    /// Total: every input, including the empty string, yields a (possibly
    /// empty) list.
    pub fn parse_str(&self, text: &str) -> Vec<Message> {
        let mut assembler = self.assembler();
        let mut messages = Vec::new();

        for line in split_lines(text) {
            if let Some(sealed) = assembler.push_line(line) {
                messages.push(sealed);
            }
        }
        messages.extend(assembler.finish());

        debug!(
            messages = messages.len(),
            discarded = assembler.discarded(),
            "parsed transcript"
        );
        messages
    }

    /// Reads and parses a transcript file.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::Io`](crate::ChatviewError::Io) if the file
    /// cannot be read.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Vec<Message>> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            debug!(path = %path.display(), "transcript contains invalid UTF-8, decoded lossily");
        }
        Ok(self.parse_str(&text))
    }

    /// Streams messages from a reader one line at a time.
    #[cfg(feature = "streaming")]
    pub fn stream<R: BufRead>(&self, reader: R) -> MessageStream<'_, R> {
        MessageStream::new(self.assembler(), reader)
    }

    /// Opens a transcript file and streams its messages.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::Io`](crate::ChatviewError::Io) if the file
    /// cannot be opened.
    #[cfg(feature = "streaming")]
    pub fn stream_file(
        &self,
        path: impl AsRef<Path>,
        config: StreamingConfig,
    ) -> Result<MessageStream<'_, BufReader<File>>> {
        let file = File::open(path.as_ref())?;
        let total = file.metadata()?.len();
        let reader = BufReader::with_capacity(config.buffer_size, file);
        Ok(MessageStream::new(self.assembler(), reader).with_total_bytes(total))
    }

    /// Returns a fresh line-by-line state machine bound to this parser.
    pub fn assembler(&self) -> LineAssembler<'_> {
        LineAssembler::new(self)
    }

    fn is_self(&self, sender: &str) -> bool {
        let sender = sender.to_lowercase();
        self.self_ids.iter().any(|id| *id == sender)
    }

    /// Builds the message opened by a header line.
    fn classify(&self, header: &HeaderMatch<'_>) -> Message {
        let raw = header.rest;

        let (sender, body) = match raw.split_once(": ") {
            Some(parts) if !self.system.is_match(raw) => parts,
            _ => {
                return Message::system(header.date, header.time, raw).with_dialect(header.dialect);
            }
        };

        let mut kind = MessageKind::User;
        let mut attachment = header.dialect.attachment_name(body);
        if attachment.is_some() {
            kind = MessageKind::Image;
        }
        if let Some(document) = document_omitted(body) {
            kind = MessageKind::Document;
            attachment = Some(document);
        }

        let body = strip_direction_marks(body);
        let message = Message::new(header.date, header.time, sender, body, kind)
            .with_is_me(self.is_self(sender))
            .with_dialect(header.dialect);

        if let Some(call) = detect_call(&message.content) {
            return message.with_call(call.call_type, call.detail);
        }

        match attachment {
            Some(name) => message.with_attachment(name),
            None => message,
        }
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental form of the parser: feed lines, collect sealed messages.
///
/// A message stays open until the next header line arrives or
/// [`finish`](Self::finish) is called.
///
/// # Example
///
/// ```rust
/// use chatview::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let mut assembler = parser.assembler();
///
/// assert!(assembler.push_line("3/14/24, 9:05 PM - Alice: first").is_none());
/// assert!(assembler.push_line("second line").is_none());
///
/// let sealed = assembler.push_line("3/14/24, 9:06 PM - Bob: next").unwrap();
/// assert_eq!(sealed.content, "first\nsecond line");
///
/// let last = assembler.finish().unwrap();
/// assert_eq!(last.sender, "Bob");
/// ```
#[derive(Debug)]
pub struct LineAssembler<'p> {
    parser: &'p TranscriptParser,
    current: Option<Message>,
    discarded: usize,
}

impl<'p> LineAssembler<'p> {
    fn new(parser: &'p TranscriptParser) -> Self {
        Self {
            parser,
            current: None,
            discarded: 0,
        }
    }

    /// Feeds one line (without its line terminator).
    ///
    /// Returns the previously open message when `line` starts a new one.
    pub fn push_line(&mut self, line: &str) -> Option<Message> {
        if let Some(header) = Dialect::match_header(line) {
            let next = self.parser.classify(&header);
            return self.current.replace(next);
        }

        match self.current.as_mut() {
            Some(open) => open.push_line(line),
            None => {
                self.discarded += 1;
                trace!(line, "dropping line before first header");
            }
        }
        None
    }

    /// Seals and returns the open message, if any.
    pub fn finish(&mut self) -> Option<Message> {
        self.current.take()
    }

    /// Returns `true` while a message is open.
    pub fn has_open_message(&self) -> bool {
        self.current.is_some()
    }

    /// Number of lines dropped because no message was open.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

/// Parses a transcript with the default configuration.
///
/// ```rust
/// let messages = chatview::parse("3/14/24, 9:05 PM - Alice: Hello there");
/// assert_eq!(messages[0].sender, "Alice");
/// ```
pub fn parse(text: &str) -> Vec<Message> {
    TranscriptParser::new().parse_str(text)
}

/// Splits on `\n`, dropping one trailing `\r` per line and the empty
/// segment after a final terminator.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn lowercase_all(names: &[String]) -> Vec<String> {
    names.iter().map(|name| name.to_lowercase()).collect()
}
