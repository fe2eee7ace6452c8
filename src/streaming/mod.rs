//! Streaming transcript reader for large exports.
//!
//! [`MessageStream`] pulls one line at a time from any [`BufRead`] and
//! yields each message as soon as the next header seals it, so memory use
//! stays proportional to the longest message rather than the whole file.
//!
//! The stream runs the same [`LineAssembler`] as
//! [`TranscriptParser::parse_str`], so collecting a stream gives exactly the
//! same messages as parsing the whole text.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatview::parser::TranscriptParser;
//! use chatview::streaming::StreamingConfig;
//!
//! let parser = TranscriptParser::new();
//! for result in parser.stream_file("large_chat.txt", StreamingConfig::default())? {
//!     let message = result?;
//!     println!("{}: {}", message.sender, message.content);
//! }
//! # Ok::<(), chatview::ChatviewError>(())
//! ```
//!
//! [`BufRead`]: std::io::BufRead
//! [`LineAssembler`]: crate::parser::LineAssembler
//! [`TranscriptParser::parse_str`]: crate::parser::TranscriptParser::parse_str

mod traits;
mod transcript;

pub use traits::{MessageIterator, StreamingConfig};
pub use transcript::MessageStream;
