//! Dispatcher: the single loop that parses inbound lines and routes them.
//!
//! ```text
//!   inbox ──▶ parse ──▶ broadcast (subscribers)
//!                  └──▶ Registry ──▶ spawn handler task (bounded)
//! ```
//!
//! Lines are parsed and handler tasks are spawned in arrival order. Handler
//! completion order is not controlled.

use super::shutdown::{ShutdownListener, ShutdownOrigin, ShutdownRequest};
use crate::handlers::{Context, Registry};
use crate::telemetry::spans;
use bytes::Bytes;
use ircling_proto::{Message, parse};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, broadcast, mpsc};
use tracing::{Instrument, debug, trace, warn};

pub(crate) struct Dispatcher {
    inbox: mpsc::Receiver<Bytes>,
    shutdown: ShutdownListener,
    registry: Arc<Registry>,
    ctx: Context,
    events: broadcast::Sender<Message>,
    permits: Arc<Semaphore>,
}

/// What the loop should do after an event.
enum Flow {
    Continue,
    Stop,
}

impl Dispatcher {
    pub(crate) fn new(
        inbox: mpsc::Receiver<Bytes>,
        shutdown: ShutdownListener,
        registry: Arc<Registry>,
        ctx: Context,
        events: broadcast::Sender<Message>,
        max_inflight_handlers: usize,
    ) -> Self {
        Self {
            inbox,
            shutdown,
            registry,
            ctx,
            events,
            permits: Arc::new(Semaphore::new(max_inflight_handlers)),
        }
    }

    /// Run until a shutdown request arrives or the inbox closes.
    ///
    /// Consumes the dispatcher; dropping it on return raises the
    /// `stopped` flag.
    pub(crate) async fn run(mut self) {
        loop {
            let flow = tokio::select! {
                biased;
                request = self.shutdown.recv() => self.on_shutdown(request),
                line = self.inbox.recv() => match line {
                    Some(line) => self.dispatch(line).await,
                    None => {
                        debug!("Inbox closed, dispatcher exiting");
                        Flow::Stop
                    }
                },
            };

            if let Flow::Stop = flow {
                break;
            }
        }
        debug!("Dispatcher stopped");
    }

    fn on_shutdown(&mut self, request: Option<ShutdownRequest>) -> Flow {
        let Some(request) = request else {
            // Every handle is gone; nobody can ask again.
            return Flow::Stop;
        };

        if request.origin == ShutdownOrigin::ConnectionLost {
            // The reader has stopped pushing; deliver what it already read.
            // Never waits on a handler slot.
            let mut drained = 0usize;
            while let Ok(line) = self.inbox.try_recv() {
                self.route(line);
                drained += 1;
            }
            if drained > 0 {
                debug!(drained, "Drained buffered lines before stopping");
            }
        }

        debug!(origin = ?request.origin, "Dispatcher acknowledging shutdown");
        request.acknowledge();
        Flow::Stop
    }

    /// Route one line, staying responsive to shutdown while waiting for a
    /// handler slot.
    async fn dispatch(&mut self, line: Bytes) -> Flow {
        let Some(msg) = self.parse_line(&line) else {
            return Flow::Continue;
        };
        self.publish(&msg);

        let Some(handler) = self.registry.get(&msg.command) else {
            trace!(command = %msg.command, "No handler registered");
            return Flow::Continue;
        };

        let permit = tokio::select! {
            biased;
            request = self.shutdown.recv() => return self.on_shutdown(request),
            permit = Arc::clone(&self.permits).acquire_owned() => permit,
        };
        match permit {
            Ok(permit) => self.spawn_handler(handler, msg, permit),
            Err(_) => return Flow::Stop,
        }
        Flow::Continue
    }

    /// Route one buffered line while stopping. A handled line is dropped
    /// when every handler slot is taken.
    fn route(&self, line: Bytes) {
        let Some(msg) = self.parse_line(&line) else {
            return;
        };
        self.publish(&msg);

        let Some(handler) = self.registry.get(&msg.command) else {
            trace!(command = %msg.command, "No handler registered");
            return;
        };
        match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => self.spawn_handler(handler, msg, permit),
            Err(_) => warn!(
                command = %msg.command,
                "No free handler slot while stopping, dropping line"
            ),
        }
    }

    fn parse_line(&self, line: &[u8]) -> Option<Message> {
        match parse(line) {
            Ok(msg) => {
                trace!(command = %msg.command, "Parsed message");
                Some(msg)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    line = %String::from_utf8_lossy(line),
                    "Discarding unparseable line"
                );
                None
            }
        }
    }

    fn publish(&self, msg: &Message) {
        // Err only means nobody is subscribed right now.
        let _ = self.events.send(msg.clone());
    }

    fn spawn_handler(
        &self,
        handler: Arc<dyn crate::handlers::Handler>,
        msg: Message,
        permit: OwnedSemaphorePermit,
    ) {
        let ctx = self.ctx.clone();
        let span = spans::command(&msg.command, msg.prefix.as_deref());
        tokio::spawn(
            async move {
                let _permit = permit;
                if let Err(e) = handler.handle(&ctx, &msg).await {
                    warn!(error = %e, "Handler failed");
                }
            }
            .instrument(span),
        );
    }
}
