//! vargs
//!
//! Reads items from a byte stream and sends each one to the terminal as an
//! `ESC ] 51 ; <json> BEL` message, the way xargs runs a command per item.
//!
//! - `tokenizer`: separator-aware, UTF-8 correct incremental splitting
//! - `message`: per-item message construction and OSC 51 framing
//! - `pipeline`: producer/consumer hand-off with cooperative cancellation
//! - `app`: command line arguments and resolved configuration

pub mod app;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod tokenizer;

pub use app::{CliArgs, Config};
pub use error::{Error, Result};
pub use pipeline::{run, Cancellation, RunReport};
