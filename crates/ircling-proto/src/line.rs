//! Line-based codec for tokio.
//!
//! Decodes newline-terminated raw byte lines (`\n` or `\r\n`) with the
//! terminator removed, and encodes outbound text with `\r\n` appended.

use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Default read limit: 512 bytes of classic IRC plus room for the 8191-byte
/// lines some servers emit.
pub const DEFAULT_MAX_LINE_LEN: usize = 8191;

/// Line-based codec that yields raw lines as [`Bytes`].
///
/// Decoding does not validate UTF-8; that is left to the message parser so
/// a bad line is reported as a parse failure instead of tearing down the
/// stream.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, terminator included
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with [`DEFAULT_MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// Maximum accepted line length in bytes.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Reject characters that would split or truncate an outbound line.
    fn validate_outbound(line: &str) -> error::Result<()> {
        match line.chars().find(|ch| matches!(ch, '\r' | '\n' | '\0')) {
            Some(ch) => Err(ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_terminator(mut line: BytesMut) -> Bytes {
    if line.last() == Some(&b'\n') {
        line.truncate(line.len() - 1);
    }
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
    line.freeze()
}

impl Decoder for LineCodec {
    type Item = Bytes;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Bytes>> {
        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            Ok(Some(trim_terminator(line)))
        } else {
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }

    /// A final unterminated line is still delivered when the peer closes.
    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Bytes>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }
        self.next_index = 0;
        let rest = src.split_to(src.len());
        Ok(Some(trim_terminator(rest)))
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        <Self as Encoder<&str>>::encode(self, line.as_str(), dst)
    }
}

impl<'a> Encoder<&'a str> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: &'a str, dst: &mut BytesMut) -> error::Result<()> {
        Self::validate_outbound(line)?;
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
