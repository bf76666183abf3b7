//! Session - one client connection with its reader and dispatcher tasks.
//!
//! ```text
//!   ┌──────────┐  raw lines  ┌────────────┐  spawn   ┌──────────┐
//!   │  reader  │ ──────────▶ │ dispatcher │ ───────▶ │ handlers │
//!   └────┬─────┘   (mpsc)    └─────┬──────┘          └────┬─────┘
//!        │ EOF/error               │ ack                  │
//!        └──── shutdown ──────────▶│                      ▼
//!   Session::quit ─ shutdown ─────▶│                  Outbox ──▶ socket
//! ```
//!
//! The reader owns the read half. The dispatcher owns the inbox receiver
//! and the shutdown listener. The write half is shared through [`Outbox`].

mod dispatch;
mod outbox;
mod reader;
mod shutdown;

pub use outbox::Outbox;
pub use shutdown::{ShutdownHandle, ShutdownOrigin};

use crate::config::{Config, ServerConfig, SessionConfig};
use crate::error::{ConnectError, WriteError};
use crate::handlers::{Context, Registry};
use crate::network::Connection;
use crate::telemetry::spans;
use dispatch::Dispatcher;
use ircling_proto::{Command, Message};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, warn};

/// Who the session registers as. Fixed for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// `host:port` the session connected to.
    pub server_address: String,
    pub nickname: String,
    pub real_name: String,
}

impl Identity {
    pub fn new(
        server_address: impl Into<String>,
        nickname: impl Into<String>,
        real_name: impl Into<String>,
    ) -> Self {
        Self {
            server_address: server_address.into(),
            nickname: nickname.into(),
            real_name: real_name.into(),
        }
    }
}

impl From<&ServerConfig> for Identity {
    fn from(server: &ServerConfig) -> Self {
        Self::new(&server.address, &server.nickname, &server.real_name)
    }
}

/// Join handles not yet awaited. A slot is cleared only after its task
/// has been joined.
struct Tasks {
    reader: Option<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<()>>,
}

impl Tasks {
    fn is_joined(&self) -> bool {
        self.reader.is_none() && self.dispatcher.is_none()
    }
}

async fn join_task(task: &'static str, slot: &mut Option<JoinHandle<()>>) {
    let Some(handle) = slot.as_mut() else {
        return;
    };
    let result = handle.await;
    *slot = None;
    if let Err(e) = result {
        warn!(task, error = %e, "Session task ended abnormally");
    }
}

/// A live client session.
///
/// Created connected; the caller decides when to [`register`](Self::register).
/// All operations take `&self`, so a session can be shared behind an `Arc`.
pub struct Session {
    identity: Arc<Identity>,
    outbox: Outbox,
    shutdown: ShutdownHandle,
    cancel: CancellationToken,
    tasks: Mutex<Tasks>,
    events: broadcast::Sender<Message>,
}

impl Session {
    /// Connect to the configured server with the built-in handlers.
    pub async fn connect(config: &Config) -> Result<Self, ConnectError> {
        Self::connect_with_registry(config, Registry::new()).await
    }

    /// Connect to the configured server with a caller-supplied handler table.
    pub async fn connect_with_registry(
        config: &Config,
        registry: Registry,
    ) -> Result<Self, ConnectError> {
        let connection =
            Connection::connect(&config.server.address, config.session.max_line_len).await?;
        info!(address = %config.server.address, peer = ?connection.peer(), "Connected");
        Ok(Self::start(
            connection,
            Identity::from(&config.server),
            &config.session,
            registry,
        ))
    }

    /// Start the reader and dispatcher over an established connection.
    ///
    /// Must be called from within a tokio runtime. Zero capacities in
    /// `settings` are raised to one.
    pub fn start(
        connection: Connection,
        identity: Identity,
        settings: &SessionConfig,
        registry: Registry,
    ) -> Self {
        let identity = Arc::new(identity);
        let span = spans::session(&identity.server_address, &identity.nickname);

        let (reader, writer) = connection.split();
        let outbox = Outbox::new(writer);
        let (inbox_tx, inbox_rx) = mpsc::channel(settings.inbox_capacity.max(1));
        let (shutdown, listener) = shutdown::channel();
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        let cancel = CancellationToken::new();

        let dispatcher = Dispatcher::new(
            inbox_rx,
            listener,
            Arc::new(registry),
            Context::new(outbox.clone(), Arc::clone(&identity)),
            events.clone(),
            settings.max_inflight_handlers.max(1),
        );
        let dispatcher = tokio::spawn(dispatcher.run().instrument(span.clone()));
        let reader = tokio::spawn(
            reader::run(reader, inbox_tx, shutdown.clone(), cancel.clone()).instrument(span),
        );

        Self {
            identity,
            outbox,
            shutdown,
            cancel,
            tasks: Mutex::new(Tasks {
                reader: Some(reader),
                dispatcher: Some(dispatcher),
            }),
            events,
        }
    }

    // ========================================================================
    // Outbound operations
    // ========================================================================

    /// Register with the server: `PASS *`, `NICK`, then `USER`.
    ///
    /// Stops at the first failed write.
    pub async fn register(&self) -> Result<(), WriteError> {
        let nickname = &self.identity.nickname;
        self.outbox.send(&Command::pass_anonymous()).await?;
        self.outbox.send(&Command::nick(nickname)).await?;
        self.outbox
            .send(&Command::user(nickname, &self.identity.real_name))
            .await?;
        info!(nick = %nickname, "Registration sent");
        Ok(())
    }

    /// `JOIN <channel>`.
    pub async fn join(&self, channel: &str) -> Result<(), WriteError> {
        self.outbox.send(&Command::join(channel)).await
    }

    /// `PRIVMSG <channel> :<text>`.
    pub async fn send_message(&self, channel: &str, text: &str) -> Result<(), WriteError> {
        self.outbox.send(&Command::privmsg(channel, text)).await
    }

    /// `PONG`, or `PONG :<token>` when a token is given.
    pub async fn pong(&self, token: Option<&str>) -> Result<(), WriteError> {
        self.outbox.pong(token).await
    }

    /// Send a caller-built line. CRLF is appended.
    pub async fn send_raw(&self, line: &str) -> Result<(), WriteError> {
        self.outbox.send_raw(line).await
    }

    // ========================================================================
    // Shutdown
    // ========================================================================

    /// Stop the dispatcher and reader, close the connection, and wait for
    /// both tasks to finish.
    ///
    /// Safe to call any number of times, from any number of tasks, and
    /// after the server has already closed the connection. Every call
    /// returns once the session is fully stopped. Concurrent callers wait
    /// on the same lock; a call dropped midway leaves the remaining tasks
    /// for the next caller to join.
    pub async fn quit(&self) {
        let mut tasks = self.tasks.lock().await;
        if tasks.is_joined() {
            return;
        }

        info!("Shutting down session");
        self.shutdown.request(ShutdownOrigin::Local).await;
        self.cancel.cancel();

        if let Err(e) = self.outbox.close().await {
            debug!(error = %e, code = e.error_code(), "Error closing write half");
        }

        join_task("reader", &mut tasks.reader).await;
        join_task("dispatcher", &mut tasks.dispatcher).await;
        info!("Session closed");
    }

    /// Send `QUIT [:<reason>]` (best effort), then [`quit`](Self::quit).
    pub async fn disconnect(&self, reason: Option<&str>) {
        if let Err(e) = self.outbox.send(&Command::quit(reason)).await {
            debug!(error = %e, "QUIT not delivered");
        }
        self.quit().await;
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Receive every successfully parsed inbound message from now on.
    ///
    /// Slow receivers lag and lose messages; the dispatcher never waits.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.events.subscribe()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the dispatcher has stopped, by `quit` or by losing the
    /// connection.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_stopped()
    }

    /// Wait until the dispatcher has stopped.
    pub async fn stopped(&self) {
        self.shutdown.stopped().await;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Unjoined tasks wind down on their own once the reader is gone.
        self.cancel.cancel();
    }
}
