//! UTF-8 decoding for the tokenizer
//!
//! Decodes one code point at a time straight out of the scan buffer. A
//! sequence cut off by the end of the buffer is reported as pending so the
//! caller can refill before deciding what the bytes mean.

/// Substituted for every byte that does not start a valid sequence
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// UTF-8 decoder state
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    /// Bytes accumulated for current character
    buffer: [u8; 4],
    /// Number of bytes in buffer
    len: usize,
    /// Expected total bytes for current character
    expected: usize,
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// Successfully decoded a character
    Char(char),
    /// Invalid sequence
    Invalid,
}

/// A code point decoded from the front of a byte slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// `width` bytes decoded to `ch`. Invalid input decodes to
    /// [`REPLACEMENT_CHAR`] with a width of one byte.
    Char { ch: char, width: usize },
    /// The slice ends inside a sequence and more input may still arrive
    Incomplete,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// Feed a byte to the decoder
    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        // ASCII fast path
        if self.len == 0 && byte < 0x80 {
            return Utf8Result::Char(byte as char);
        }

        if self.len == 0 {
            self.expected = match byte {
                0xC0..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF7 => 4,
                _ => return Utf8Result::Invalid,
            };
            self.buffer[0] = byte;
            self.len = 1;
            return Utf8Result::Pending;
        }

        if byte & 0b1100_0000 != 0b1000_0000 {
            self.reset();
            return Utf8Result::Invalid;
        }

        self.buffer[self.len] = byte;
        self.len += 1;

        if self.len < self.expected {
            return Utf8Result::Pending;
        }

        let result = match std::str::from_utf8(&self.buffer[..self.len]) {
            // from_utf8 rejects overlong forms, surrogates and values past U+10FFFF
            Ok(s) => s.chars().next().map_or(Utf8Result::Invalid, Utf8Result::Char),
            Err(_) => Utf8Result::Invalid,
        };

        self.reset();
        result
    }
}

/// Decode the code point at the front of `data`
///
/// When `data` ends in the middle of a sequence the answer depends on
/// `at_eof`: with more input possible the caller gets
/// [`Decoded::Incomplete`], otherwise the truncated lead byte decodes as
/// [`REPLACEMENT_CHAR`]. An empty slice is always incomplete.
pub fn decode(data: &[u8], at_eof: bool) -> Decoded {
    let mut decoder = Utf8Decoder::new();
    for (i, &byte) in data.iter().enumerate() {
        match decoder.feed(byte) {
            Utf8Result::Pending => {}
            Utf8Result::Char(ch) => return Decoded::Char { ch, width: i + 1 },
            Utf8Result::Invalid => {
                return Decoded::Char {
                    ch: REPLACEMENT_CHAR,
                    width: 1,
                }
            }
        }
    }

    if at_eof && !data.is_empty() {
        Decoded::Char {
            ch: REPLACEMENT_CHAR,
            width: 1,
        }
    } else {
        Decoded::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(b'A'), Utf8Result::Char('A'));
        assert_eq!(decoder.feed(0x00), Utf8Result::Char('\0'));
    }

    #[test]
    fn test_three_byte() {
        let mut decoder = Utf8Decoder::new();
        // '中' = U+4E2D = 0xE4 0xB8 0xAD
        assert_eq!(decoder.feed(0xE4), Utf8Result::Pending);
        assert_eq!(decoder.feed(0xB8), Utf8Result::Pending);
        assert_eq!(decoder.feed(0xAD), Utf8Result::Char('中'));
        assert_eq!(decoder.feed(b'a'), Utf8Result::Char('a'));
    }

    #[test]
    fn test_overlong_encoding() {
        let mut decoder = Utf8Decoder::new();
        // Overlong encoding of 'A'
        assert_eq!(decoder.feed(0xC1), Utf8Result::Pending);
        assert_eq!(decoder.feed(0x81), Utf8Result::Invalid);
    }

    #[test]
    fn test_surrogate_rejected() {
        let mut decoder = Utf8Decoder::new();
        // U+D800 encoded as 0xED 0xA0 0x80
        assert_eq!(decoder.feed(0xED), Utf8Result::Pending);
        assert_eq!(decoder.feed(0xA0), Utf8Result::Pending);
        assert_eq!(decoder.feed(0x80), Utf8Result::Invalid);
    }

    #[test]
    fn test_decode_widths() {
        assert_eq!(decode(b"ab", false), Decoded::Char { ch: 'a', width: 1 });
        assert_eq!(
            decode("é!".as_bytes(), false),
            Decoded::Char { ch: 'é', width: 2 }
        );
        assert_eq!(
            decode("😀".as_bytes(), true),
            Decoded::Char { ch: '😀', width: 4 }
        );
    }

    #[test]
    fn test_decode_truncated_waits_for_more() {
        assert_eq!(decode(&[0xE4, 0xB8], false), Decoded::Incomplete);
        assert_eq!(decode(&[], false), Decoded::Incomplete);
    }

    #[test]
    fn test_decode_truncated_at_eof() {
        assert_eq!(
            decode(&[0xE4, 0xB8], true),
            Decoded::Char {
                ch: REPLACEMENT_CHAR,
                width: 1
            }
        );
    }

    #[test]
    fn test_decode_invalid_does_not_swallow_next_byte() {
        // A lead byte followed by a newline: the newline must survive
        let data = [0xE4, b'\n'];
        assert_eq!(
            decode(&data, false),
            Decoded::Char {
                ch: REPLACEMENT_CHAR,
                width: 1
            }
        );
        assert_eq!(
            decode(&data[1..], false),
            Decoded::Char { ch: '\n', width: 1 }
        );
    }

    #[test]
    fn test_decode_stray_continuation() {
        assert_eq!(
            decode(&[0x80, b'a'], false),
            Decoded::Char {
                ch: REPLACEMENT_CHAR,
                width: 1
            }
        );
    }
}
