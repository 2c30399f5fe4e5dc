//! Error types for vargs

use std::io;

/// Error type for configuration, tokenizing and message output
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown separator '{0}'")]
    UnknownSeparator(String),

    #[error("no separator given")]
    NoSeparators,

    #[error("Failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error("Token exceeds the maximum size of {limit} bytes")]
    TokenTooLong { limit: usize },

    #[error("Failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write message: {0}")]
    Write(#[source] io::Error),
}

/// Result type for vargs operations
pub type Result<T> = std::result::Result<T, Error>;
