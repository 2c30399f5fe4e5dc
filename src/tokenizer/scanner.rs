//! Incremental token scanner
//!
//! [`scan_token`] is a pure split step over whatever bytes are buffered;
//! [`Tokenizer`] owns the buffer, refills it from a reader and drives the
//! split step until a token falls out. The buffer only ever holds the
//! current partial token plus one read's worth of input, so the whole
//! stream is never loaded at once.

use std::io::{self, Read};
use std::ops::Range;

use tracing::trace;

use super::separator::SeparatorSet;
use super::utf8::{decode, Decoded};
use super::Token;
use crate::error::{Error, Result};

/// Largest token the tokenizer will buffer by default
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024;

const INITIAL_BUFFER_SIZE: usize = 4096;

/// Outcome of one split step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    /// Bytes the caller may drop from the front of the buffer
    pub advance: usize,
    /// Byte range of the token within the scanned slice, if one was found
    pub token: Option<Range<usize>>,
}

/// Find the next token at the front of `data`
///
/// Leading separators are skipped, then non-separators are collected up to
/// the next separator, which is consumed along with the token. Without a
/// terminating separator a token is only produced at EOF. When no token
/// can be decided yet, `advance` still covers the skipped separators so
/// the caller does not rescan them after a refill.
pub fn scan_token(data: &[u8], at_eof: bool, separators: &SeparatorSet) -> Scan {
    // Skip separators
    let mut start = 0;
    while start < data.len() {
        match decode(&data[start..], at_eof) {
            Decoded::Char { ch, width } if separators.contains(ch) => start += width,
            Decoded::Char { .. } => break,
            Decoded::Incomplete => {
                return Scan {
                    advance: start,
                    token: None,
                }
            }
        }
    }

    // Scan until separator, marking end of token
    let mut i = start;
    while i < data.len() {
        match decode(&data[i..], at_eof) {
            Decoded::Char { ch, width } if separators.contains(ch) => {
                return Scan {
                    advance: i + width,
                    token: Some(start..i),
                };
            }
            Decoded::Char { width, .. } => i += width,
            Decoded::Incomplete => break,
        }
    }

    // Final, non-empty, non-terminated token
    if at_eof && data.len() > start {
        return Scan {
            advance: data.len(),
            token: Some(start..data.len()),
        };
    }

    Scan {
        advance: start,
        token: None,
    }
}

/// Lazy, forward-only sequence of tokens read from `R`
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    separators: SeparatorSet,
    buf: Vec<u8>,
    /// Start of unconsumed data in `buf`
    start: usize,
    /// End of valid data in `buf`
    end: usize,
    eof: bool,
    /// Set once the sequence has ended, normally or with an error
    done: bool,
    /// Read failure held back until the buffered remainder is flushed
    read_error: Option<Error>,
    max_token_size: usize,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer reading from `reader`
    pub fn new(reader: R, separators: SeparatorSet) -> Self {
        Self {
            reader,
            separators,
            buf: Vec::new(),
            start: 0,
            end: 0,
            eof: false,
            done: false,
            read_error: None,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }

    /// Limit the buffer to `size` bytes (at least one)
    pub fn with_max_token_size(mut self, size: usize) -> Self {
        self.max_token_size = size.max(1);
        self
    }

    /// Produce the next token, or `None` once the input is exhausted
    ///
    /// A read failure ends the input like EOF: whatever is still buffered is
    /// emitted as a final token first, and the error is returned on the call
    /// after that. After an error further calls return `None`.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.done {
            return Ok(None);
        }

        loop {
            let scan = scan_token(&self.buf[self.start..self.end], self.eof, &self.separators);
            let base = self.start;
            self.start += scan.advance;

            if let Some(range) = scan.token {
                let bytes = &self.buf[base + range.start..base + range.end];
                return Ok(Some(Token::from_utf8_lossy(bytes)));
            }

            if self.eof {
                self.done = true;
                return match self.read_error.take() {
                    Some(e) => Err(e),
                    None => Ok(None),
                };
            }

            match self.fill() {
                Ok(()) => {}
                Err(e @ Error::Read(_)) => {
                    trace!("Read failed, flushing buffered input");
                    self.eof = true;
                    self.read_error = Some(e);
                }
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
    }

    /// Read more input into the buffer, compacting and growing it as needed
    fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == self.buf.len() {
            if self.buf.len() >= self.max_token_size {
                return Err(Error::TokenTooLong {
                    limit: self.max_token_size,
                });
            }
            let new_len = (self.buf.len() * 2)
                .max(INITIAL_BUFFER_SIZE)
                .min(self.max_token_size);
            trace!("Growing scan buffer to {} bytes", new_len);
            self.buf.resize(new_len, 0);
        }

        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    trace!("Input exhausted");
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    trace!("Read {} bytes", n);
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Read(e)),
            }
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
