//! Separator classes
//!
//! Separators are configured by name, never as raw characters. Each name
//! expands to one or more code points, and every code point is a boundary
//! on its own (CR and LF are two boundaries, not a CRLF unit).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A named separator class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// U+0020
    Space,
    /// U+0009
    Tab,
    /// U+000D and U+000A
    Newline,
    /// U+0000
    Nul,
}

impl Separator {
    /// All separator classes, in the order they are documented
    pub const ALL: [Separator; 4] = [
        Separator::Space,
        Separator::Tab,
        Separator::Newline,
        Separator::Nul,
    ];

    /// Code points recognized as boundaries for this class
    pub fn code_points(self) -> &'static [char] {
        match self {
            Separator::Space => &[' '],
            Separator::Tab => &['\t'],
            Separator::Newline => &['\r', '\n'],
            Separator::Nul => &['\0'],
        }
    }

    /// Configuration name of this class
    pub fn name(self) -> &'static str {
        match self {
            Separator::Space => "space",
            Separator::Tab => "tab",
            Separator::Newline => "newline",
            Separator::Nul => "nul",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Separator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Separator::ALL
            .into_iter()
            .find(|sep| sep.name() == s)
            .ok_or_else(|| Error::UnknownSeparator(s.to_string()))
    }
}

/// Ordered set of boundary code points, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    chars: Vec<char>,
}

impl SeparatorSet {
    /// Build a set from raw code points. Duplicates keep their first position.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self> {
        let mut set = Vec::new();
        for ch in chars {
            if !set.contains(&ch) {
                set.push(ch);
            }
        }
        if set.is_empty() {
            return Err(Error::NoSeparators);
        }
        Ok(Self { chars: set })
    }

    /// Parse a comma-separated list of separator names, e.g. `"space,tab"`
    ///
    /// Every name must be known; an empty name (as in `"space,"`) is
    /// rejected like any other unknown one.
    pub fn parse(names: &str) -> Result<Self> {
        let mut chars = Vec::new();
        for name in names.split(',') {
            let sep: Separator = name.parse()?;
            chars.extend_from_slice(sep.code_points());
        }
        Self::new(chars)
    }

    /// The NUL-only set
    pub fn nul() -> Self {
        Self {
            chars: Separator::Nul.code_points().to_vec(),
        }
    }

    /// Whether `ch` is a boundary
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Boundary code points in configuration order
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self {
            chars: Separator::Newline.code_points().to_vec(),
        }
    }
}

impl FromStr for SeparatorSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
