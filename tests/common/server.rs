//! Scripted fake IRC server.
//!
//! Binds to an ephemeral port on localhost and hands the test the accepted
//! socket, so each test decides exactly what the "server" sends and when it
//! hangs up.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A listening fake server.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    /// Bind to `127.0.0.1:0`.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    /// `host:port` to point a client at.
    pub fn address(&self) -> String {
        self.listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default()
    }

    /// Accept one client.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(RECV_TIMEOUT, self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }
}

/// The server's side of one accepted client.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

#[allow(dead_code)]
impl ServerConn {
    /// Send one line; CRLF is appended if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the client, terminator stripped.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("client closed the connection");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the client closes its write side.
    pub async fn recv_until_eof(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let n = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
            if n == 0 {
                return Ok(lines);
            }
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    /// Hang up on the client.
    pub fn close(self) {
        drop(self);
    }
}
