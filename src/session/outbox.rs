//! Outbox: the session's shared, serialized write path.

use crate::error::WriteError;
use crate::network::ConnectionWriter;
use ircling_proto::Command;
use std::sync::Arc;

/// Cloneable handle to the connection's write half.
///
/// Every clone writes through the same lock, so lines from the session's
/// caller and from handler tasks never interleave.
#[derive(Clone)]
pub struct Outbox {
    writer: Arc<ConnectionWriter>,
}

impl Outbox {
    pub(crate) fn new(writer: ConnectionWriter) -> Self {
        Self {
            writer: Arc::new(writer),
        }
    }

    /// Send a typed command.
    ///
    /// Commands whose middle parameters would not survive as single
    /// parameters are rejected before anything is written.
    pub async fn send(&self, command: &Command) -> Result<(), WriteError> {
        command.validate()?;
        self.writer.write_line(&command.to_string()).await
    }

    /// Send a caller-built line verbatim (without terminator).
    pub async fn send_raw(&self, line: &str) -> Result<(), WriteError> {
        self.writer.write_line(line).await
    }

    /// Answer a PING, echoing its token when present.
    pub async fn pong(&self, token: Option<&str>) -> Result<(), WriteError> {
        self.send(&Command::pong(token)).await
    }

    pub(crate) async fn close(&self) -> Result<(), WriteError> {
        self.writer.close().await
    }
}
