//! Separator-aware tokenizer
//!
//! Splits a byte stream into text tokens on a configurable set of
//! separator code points. Decoding happens per code point, so multi-byte
//! separators and tokens work, and invalid input becomes U+FFFD instead
//! of an error.

mod scanner;
mod separator;
mod utf8;

use std::fmt;

pub use scanner::{scan_token, Scan, Tokenizer, DEFAULT_MAX_TOKEN_SIZE};
pub use separator::{Separator, SeparatorSet};
pub use utf8::{decode, Decoded, Utf8Decoder, Utf8Result, REPLACEMENT_CHAR};

/// One non-empty item of text found between separators
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Decode token bytes, replacing invalid sequences with U+FFFD
    pub(crate) fn from_utf8_lossy(bytes: &[u8]) -> Self {
        debug_assert!(!bytes.is_empty());
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
