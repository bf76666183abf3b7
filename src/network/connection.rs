//! Connection - a TCP stream framed into IRC lines.
//!
//! ```text
//!                 ┌──────────────────────┐
//!   socket ─────▶ │  ConnectionReader    │ ──▶ raw line bytes (reader task)
//!                 └──────────────────────┘
//!                 ┌──────────────────────┐
//!   socket ◀───── │  ConnectionWriter    │ ◀── any task (serialized by a lock)
//!                 └──────────────────────┘
//! ```
//!
//! The reader is owned by exactly one task. The writer is shared; each
//! `write_line` holds the lock for the whole line so concurrent writers
//! never interleave bytes.

use crate::error::{ConnectError, ReadError, WriteError};
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use ircling_proto::LineCodec;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, trace, warn};

/// An established connection, not yet split.
pub struct Connection {
    stream: TcpStream,
    peer: Option<SocketAddr>,
    max_line_len: usize,
}

impl Connection {
    /// Resolve `address` and connect to the first address that accepts.
    pub async fn connect(address: &str, max_line_len: usize) -> Result<Self, ConnectError> {
        let candidates: Vec<SocketAddr> = tokio::net::lookup_host(address)
            .await
            .map_err(|source| ConnectError::Resolve {
                address: address.to_string(),
                source,
            })?
            .collect();

        let mut last_err = None;
        for candidate in &candidates {
            match TcpStream::connect(candidate).await {
                Ok(stream) => {
                    debug!(%address, peer = %candidate, "Connected");
                    return Ok(Self::from_stream(stream, max_line_len));
                }
                Err(e) => {
                    warn!(%address, peer = %candidate, error = %e, "Connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(source) => Err(ConnectError::Connect {
                address: address.to_string(),
                source,
            }),
            None => Err(ConnectError::NoAddresses {
                address: address.to_string(),
            }),
        }
    }

    /// Wrap an already-connected stream.
    pub fn from_stream(stream: TcpStream, max_line_len: usize) -> Self {
        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Failed to set TCP_NODELAY");
        }
        let peer = stream.peer_addr().ok();
        Self {
            stream,
            peer,
            max_line_len,
        }
    }

    /// Remote address, if the socket could report it.
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Split into an exclusively-owned reader and a shareable writer.
    pub fn split(self) -> (ConnectionReader, ConnectionWriter) {
        let (read_half, write_half) = self.stream.into_split();
        let reader = ConnectionReader {
            inner: FramedRead::new(read_half, LineCodec::with_max_len(self.max_line_len)),
        };
        let writer = ConnectionWriter {
            inner: Mutex::new(Some(FramedWrite::new(write_half, LineCodec::new()))),
        };
        (reader, writer)
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Inbound half. Yields one raw line per call, terminators stripped.
pub struct ConnectionReader {
    inner: FramedRead<OwnedReadHalf, LineCodec>,
}

impl ConnectionReader {
    /// Read the next line.
    ///
    /// Returns `Ok(None)` on a clean end-of-stream.
    pub async fn read_line(&mut self) -> Result<Option<Bytes>, ReadError> {
        match self.inner.next().await {
            Some(Ok(line)) => {
                trace!(direction = "in", len = line.len(), "Line received");
                Ok(Some(line))
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Outbound half. Safe to share between tasks behind an `Arc`.
pub struct ConnectionWriter {
    inner: Mutex<Option<FramedWrite<OwnedWriteHalf, LineCodec>>>,
}

impl ConnectionWriter {
    /// Write one line; CRLF is appended. The line is flushed before return.
    pub async fn write_line(&self, line: &str) -> Result<(), WriteError> {
        let mut guard = self.inner.lock().await;
        let sink = guard.as_mut().ok_or(WriteError::Closed)?;
        sink.send(line).await?;
        debug!(direction = "out", line = %line, "Line sent");
        Ok(())
    }

    /// Flush and shut down the write side. Later writes fail with
    /// [`WriteError::Closed`]. Closing twice is a no-op.
    pub async fn close(&self) -> Result<(), WriteError> {
        let sink = self.inner.lock().await.take();
        match sink {
            Some(mut sink) => {
                <_ as SinkExt<&str>>::close(&mut sink).await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Whether `close` has been called.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}
