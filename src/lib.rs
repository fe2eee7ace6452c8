//! # Chatview
//!
//! A Rust library for reading exported WhatsApp chat transcripts and turning
//! them into a readable chat view or structured data.
//!
//! ## Overview
//!
//! A WhatsApp export is a plain-text transcript plus the media files it
//! references. Two header grammars are recognised, line by line:
//!
//! - **Group**: `3/14/24, 9:05 PM - Alice: Hello`
//! - **Bracketed**: `[05/03/2024, 14:02:10] Bob: Hi`
//!
//! Every message is classified as one of five kinds (`system`, `user`,
//! `image`, `document`, `call`). Lines that are not headers continue the
//! previous message; lines before the first header are discarded. Parsing
//! never fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatview::{MessageKind, parse};
//!
//! let messages = parse("\
//! 3/14/24, 9:05 PM - Alice created group \"Trip\"
//! 3/14/24, 9:06 PM - Alice: Who's in?
//! 3/14/24, 9:07 PM - You: IMG-20240314-WA0001.jpg (file attached)
//! 3/14/24, 9:08 PM - Bob: Missed voice call");
//!
//! assert_eq!(messages.len(), 4);
//! assert_eq!(messages[0].kind, MessageKind::System);
//! assert_eq!(messages[2].attachment_name(), Some("IMG-20240314-WA0001.jpg"));
//! assert!(messages[2].is_me);
//! assert_eq!(messages[3].kind, MessageKind::Call);
//! ```
//!
//! ## Exported folders
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "bundle", feature = "html"))]
//! # fn main() -> chatview::Result<()> {
//! use chatview::bundle::ExportBundle;
//! use chatview::config::RenderConfig;
//! use chatview::parser::TranscriptParser;
//! use chatview::render::{ChatView, to_html};
//!
//! let bundle = ExportBundle::from_dir("WhatsApp Chat with Alice")?;
//! let messages = bundle.parse(&TranscriptParser::new())?;
//!
//! let config = RenderConfig::new().with_24_hour(true);
//! let view = ChatView::build(&messages, &bundle.files, &config);
//! std::fs::write("chat.html", to_html(&view, &config))?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "bundle", feature = "html")))]
//! # fn main() {}
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! # #[cfg(feature = "streaming")]
//! # fn main() -> chatview::Result<()> {
//! use chatview::parser::TranscriptParser;
//! use chatview::streaming::StreamingConfig;
//!
//! let parser = TranscriptParser::new();
//! for msg in parser.stream_file("_chat.txt", StreamingConfig::new())? {
//!     let msg = msg?;
//!     println!("{}: {}", msg.sender, msg.content);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "streaming"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser) and the line assembler
//! - [`parsing`] - header dialects, system rules, attachment and call detection
//! - [`message`] - [`Message`], [`MessageKind`]
//! - [`time`] - 12/24-hour display formatting
//! - [`config`] - parser, render and bundle configuration
//! - [`bundle`] - locate the transcript and media in a drop payload
//! - [`render`] - [`ChatView`](render::ChatView), text and HTML output
//! - [`core`] - filtering, statistics, CSV/JSON/JSONL writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`streaming`] - line-by-line parsing for large transcripts
//! - [`error`] - [`ChatviewError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "bundle")]
pub mod bundle;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod files;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod render;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod time;

// Re-export the main types at the crate root for convenience
pub use error::{ChatviewError, Result};
pub use files::FileMap;
pub use message::{Message, MessageKind};
pub use parser::parse;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatview::prelude::*;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse_str("[05/03/2024, 14:02:10] Bob: hi");
/// assert_eq!(messages[0].kind, MessageKind::User);
/// ```
pub mod prelude {
    pub use crate::{Message, MessageKind};

    pub use crate::error::{ChatviewError, Result};

    pub use crate::parser::{TranscriptParser, parse};
    pub use crate::parsing::Dialect;
    pub use crate::time::format_time;

    pub use crate::config::{BundleConfig, ParserConfig, RenderConfig, Theme};
    pub use crate::files::FileMap;

    pub use crate::core::{FilterConfig, OutputConfig, TranscriptStats, apply_filters};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::render::{ChatView, to_text};
    #[cfg(feature = "html")]
    pub use crate::render::to_html;

    #[cfg(feature = "bundle")]
    pub use crate::bundle::ExportBundle;
    #[cfg(feature = "streaming")]
    pub use crate::streaming::{MessageIterator, MessageStream, StreamingConfig};
}
