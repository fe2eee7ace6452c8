//! Line-at-a-time transcript reader.

use std::io::BufRead;

use crate::Message;
use crate::error::Result;
use crate::parser::LineAssembler;

use super::MessageIterator;

/// Iterator over the messages of a transcript read from `R`.
///
/// Lines are decoded lossily, so the only errors are I/O errors from the
/// reader. The stream ends after the first error.
#[derive(Debug)]
pub struct MessageStream<'p, R: BufRead> {
    assembler: LineAssembler<'p>,
    reader: R,
    buf: Vec<u8>,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<'p, R: BufRead> MessageStream<'p, R> {
    pub(crate) fn new(assembler: LineAssembler<'p>, reader: R) -> Self {
        Self {
            assembler,
            reader,
            buf: Vec::with_capacity(4096),
            bytes_read: 0,
            total_bytes: None,
            finished: false,
        }
    }

    /// Sets the input size used for [`progress`](MessageIterator::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Number of lines dropped because they came before the first header.
    pub fn discarded(&self) -> usize {
        self.assembler.discarded()
    }

    /// Reads the next raw line into `buf`, without its terminator.
    fn read_line(&mut self) -> std::io::Result<bool> {
        self.buf.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.buf)?;
        if bytes == 0 {
            return Ok(false);
        }
        self.bytes_read += bytes as u64;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for MessageStream<'_, R> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(true) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    if let Some(sealed) = self.assembler.push_line(&line) {
                        return Some(Ok(sealed));
                    }
                }
                Ok(false) => {
                    self.finished = true;
                    return self.assembler.finish().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: BufRead> MessageIterator for MessageStream<'_, R> {
    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}
