//! Two-phase shutdown rendezvous between requesters and the dispatcher.
//!
//! A requester (the session's `quit`, or the reader task after losing the
//! connection) sends a [`ShutdownRequest`] carrying a oneshot ack and waits
//! for it. The dispatcher, which owns the [`ShutdownListener`], acks and
//! exits. When the listener is dropped it raises the `stopped` flag, so a
//! requester whose request could not be delivered, or whose ack was dropped,
//! still observes the dispatcher's exit instead of waiting forever.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

/// Who asked the dispatcher to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOrigin {
    /// `Session::quit` was called.
    Local,
    /// The reader hit end-of-stream or a read error.
    ConnectionLost,
}

/// A single stop request.
#[derive(Debug)]
pub struct ShutdownRequest {
    pub origin: ShutdownOrigin,
    ack: oneshot::Sender<()>,
}

impl ShutdownRequest {
    /// Tell the requester the dispatcher has stopped pulling lines.
    pub fn acknowledge(self) {
        // The requester may have given up; its fallback covers that.
        let _ = self.ack.send(());
    }
}

/// Requester side. Cloneable; one per interested task.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    requests: mpsc::Sender<ShutdownRequest>,
    stopped: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Ask the dispatcher to stop and wait until it has.
    ///
    /// Returns immediately if the dispatcher is already gone.
    pub async fn request(&self, origin: ShutdownOrigin) {
        if self.is_stopped() {
            return;
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        let request = ShutdownRequest { origin, ack: ack_tx };
        if self.requests.send(request).await.is_ok() && ack_rx.await.is_ok() {
            debug!(?origin, "Shutdown acknowledged");
            return;
        }

        debug!(?origin, "Dispatcher already stopping, waiting for exit");
        self.stopped().await;
    }

    /// Wait until the dispatcher has exited.
    pub async fn stopped(&self) {
        let mut stopped = self.stopped.clone();
        // Err means the flag's sender is gone, which only happens after exit.
        let _ = stopped.wait_for(|s| *s).await;
    }

    /// Whether the dispatcher has exited.
    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }
}

/// Dispatcher side. Raises the `stopped` flag when dropped.
#[derive(Debug)]
pub struct ShutdownListener {
    requests: mpsc::Receiver<ShutdownRequest>,
    stopped: watch::Sender<bool>,
}

impl ShutdownListener {
    /// Next stop request. `None` once every handle is gone.
    pub async fn recv(&mut self) -> Option<ShutdownRequest> {
        self.requests.recv().await
    }
}

impl Drop for ShutdownListener {
    fn drop(&mut self) {
        // Runs before `requests` is dropped, so a requester whose ack is
        // discarded below already sees the flag.
        self.stopped.send_replace(true);
    }
}

/// Create a connected handle/listener pair.
pub fn channel() -> (ShutdownHandle, ShutdownListener) {
    let (requests_tx, requests_rx) = mpsc::channel(1);
    let (stopped_tx, stopped_rx) = watch::channel(false);
    (
        ShutdownHandle {
            requests: requests_tx,
            stopped: stopped_rx,
        },
        ShutdownListener {
            requests: requests_rx,
            stopped: stopped_tx,
        },
    )
}
