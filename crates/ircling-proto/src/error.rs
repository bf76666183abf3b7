//! Error types for the IRC protocol layer.
//!
//! [`MessageParseError`] covers malformed lines handed to the parser;
//! [`ProtocolError`] covers framing and I/O failures in the line codec.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Framing and transport-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes buffered when the limit was hit.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Outbound text contained a character that would break line framing.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// A middle parameter was empty, started with `:` or contained a space,
    /// so it would not survive as a single parameter on the wire.
    #[error("invalid {command} parameter: {value:?}")]
    InvalidParameter {
        /// Command verb being built.
        command: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors produced when a received line does not follow the message grammar.
///
/// Exactly one of a [`crate::Message`] or one of these is produced per line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// A `:` prefix marker was immediately followed by the separating space.
    #[error("empty prefix")]
    EmptyPrefix,

    /// No command could be found: the prefix never ended, or the command
    /// token itself was empty.
    #[error("missing command")]
    MissingCommand,

    /// The prefix was terminated but the line ended before a command began.
    #[error("line ended before the command")]
    MissingCommandSpace,

    /// The line ended inside a middle parameter that was neither closed by
    /// a space nor followed by a trailing parameter.
    #[error("unterminated parameter list")]
    MalformedParams,

    /// A field contained bytes that are not valid UTF-8.
    #[error("invalid UTF-8 at byte {byte_pos}")]
    InvalidUtf8 {
        /// Offset within the line of the first invalid byte.
        byte_pos: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::MessageTooLong {
            actual: 1024,
            limit: 512,
        };
        assert_eq!(format!("{}", err), "line too long: 1024 bytes (limit: 512)");

        let err = MessageParseError::InvalidUtf8 { byte_pos: 7 };
        assert_eq!(format!("{}", err), "invalid UTF-8 at byte 7");
    }

    #[test]
    fn test_error_conversion() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let protocol_err: ProtocolError = io_err.into();

        match protocol_err {
            ProtocolError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_io_source_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let protocol_err: ProtocolError = io_err.into();

        let source = std::error::Error::source(&protocol_err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), "broken pipe");
    }
}
