//! Message construction and output
//!
//! A [`MessageTemplate`] turns each token into a list of strings, and a
//! [`MessageSink`] serializes and delivers it.

mod sink;
mod template;

pub use sink::{encode_frame, MessageSink, OscSink, OSC_PREFIX, OSC_TERMINATOR};
pub use template::{MessageBuilder, MessageTemplate, DEFAULT_COMMAND};
