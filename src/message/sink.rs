//! Message output
//!
//! Each message is a JSON array of strings wrapped in the terminal-API
//! control sequence understood by Vim's terminal window:
//!
//! ```text
//! ESC ] 51 ; <json> BEL
//! ```

use std::io::Write;

use crate::error::{Error, Result};

/// Escape prefix, channel identifier and separator in front of the payload
pub const OSC_PREFIX: &[u8] = b"\x1b]51;";

/// BEL, ending the sequence
pub const OSC_TERMINATOR: u8 = 0x07;

/// Destination for built messages
pub trait MessageSink {
    /// Serialize and deliver one message
    fn send(&mut self, message: &[String]) -> Result<()>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn send(&mut self, message: &[String]) -> Result<()> {
        (**self).send(message)
    }
}

/// Append the framed form of `message` to `out`
pub fn encode_frame(message: &[String], out: &mut Vec<u8>) -> Result<()> {
    out.extend_from_slice(OSC_PREFIX);
    serde_json::to_writer(&mut *out, message).map_err(Error::Serialize)?;
    out.push(OSC_TERMINATOR);
    Ok(())
}

/// Writes framed messages to a byte stream, flushing after each one
#[derive(Debug)]
pub struct OscSink<W> {
    writer: W,
    frame: Vec<u8>,
}

impl<W: Write> OscSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frame: Vec::with_capacity(256),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for OscSink<W> {
    fn send(&mut self, message: &[String]) -> Result<()> {
        self.frame.clear();
        encode_frame(message, &mut self.frame)?;
        self.writer.write_all(&self.frame).map_err(Error::Write)?;
        self.writer.flush().map_err(Error::Write)
    }
}
