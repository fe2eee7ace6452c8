//! Progress reporting and configuration for streaming reads.

use crate::Message;
use crate::error::Result;

/// Iterator over streamed messages with progress tracking.
///
/// Object-safe, so callers can hold a `Box<dyn MessageIterator>` regardless
/// of the underlying reader type.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> chatview::Result<()> {
/// use chatview::parser::TranscriptParser;
/// use chatview::streaming::{MessageIterator, StreamingConfig};
///
/// let parser = TranscriptParser::new();
/// let mut iter = parser.stream_file("chat.txt", StreamingConfig::default())?;
///
/// while let Some(result) = iter.next() {
///     let msg = result?;
///     if let Some(pct) = iter.progress() {
///         eprintln!("\r{:.1}% {}", pct, msg.sender);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub trait MessageIterator: Iterator<Item = Result<Message>> {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if the total size is unknown.
    fn progress(&self) -> Option<f64> {
        let total = self.total_bytes()?;
        if total == 0 {
            return None;
        }
        Some((self.bytes_processed() as f64 / total as f64) * 100.0)
    }

    /// Returns the number of bytes consumed so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }
}

/// Configuration for streaming file reads.
///
/// ```
/// use chatview::streaming::StreamingConfig;
///
/// let config = StreamingConfig::new().with_buffer_size(128 * 1024);
/// assert_eq!(config.buffer_size, 128 * 1024);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StreamingConfig {
    /// Read buffer size.
    ///
    /// Default: 64KB.
    pub buffer_size: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
        }
    }
}

impl StreamingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        done: u64,
        total: Option<u64>,
    }

    impl Iterator for Fixed {
        type Item = Result<Message>;

        fn next(&mut self) -> Option<Self::Item> {
            None
        }
    }

    impl MessageIterator for Fixed {
        fn bytes_processed(&self) -> u64 {
            self.done
        }

        fn total_bytes(&self) -> Option<u64> {
            self.total
        }
    }

    #[test]
    fn test_progress_from_totals() {
        let iter = Fixed {
            done: 25,
            total: Some(100),
        };
        assert_eq!(iter.progress(), Some(25.0));
    }

    #[test]
    fn test_progress_unknown() {
        let unknown = Fixed {
            done: 10,
            total: None,
        };
        assert_eq!(unknown.progress(), None);

        let empty = Fixed {
            done: 0,
            total: Some(0),
        };
        assert_eq!(empty.progress(), None);
    }

    #[test]
    fn test_streaming_config_default() {
        assert_eq!(StreamingConfig::default().buffer_size, 64 * 1024);
        assert_eq!(StreamingConfig::new().with_buffer_size(512).buffer_size, 512);
    }
}
