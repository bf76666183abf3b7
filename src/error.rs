//! Error types crossing the session boundary.
//!
//! Only connect-time ([`ConnectError`]) and write ([`WriteError`]) failures
//! are returned from public operations. [`ReadError`] is consumed by the
//! reader task, which turns it into a session shutdown.

use ircling_proto::ProtocolError;
use std::io;
use thiserror::Error;

// ============================================================================
// Connect-time errors
// ============================================================================

/// Failure to establish the connection. Fatal to session creation.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to resolve {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("{address} resolved to no usable addresses")]
    NoAddresses { address: String },

    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },
}

// ============================================================================
// Read errors
// ============================================================================

/// A faulted read. A clean end-of-stream is not an error; it is reported
/// as `Ok(None)` by the reader.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("read failed: {0}")]
    Io(#[source] io::Error),

    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong { actual: usize, limit: usize },

    #[error("protocol error: {0}")]
    Protocol(#[source] ProtocolError),
}

impl From<ProtocolError> for ReadError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::Io(e),
            ProtocolError::MessageTooLong { actual, limit } => Self::LineTooLong { actual, limit },
            other => Self::Protocol(other),
        }
    }
}

// ============================================================================
// Write errors
// ============================================================================

/// Failure to send a line. Returned to whichever operation attempted it.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("write failed: {0}")]
    Io(#[source] io::Error),

    #[error("refusing to send line: {0}")]
    Rejected(#[source] ProtocolError),

    #[error("connection closed")]
    Closed,
}

impl From<ProtocolError> for WriteError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::Io(e),
            other => Self::Rejected(other),
        }
    }
}

impl WriteError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Rejected(_) => "rejected",
            Self::Closed => "closed",
        }
    }
}
