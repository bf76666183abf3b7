//! Reader task: pulls lines off the socket into the dispatcher's inbox.

use super::shutdown::{ShutdownHandle, ShutdownOrigin};
use crate::network::ConnectionReader;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Run until cancelled, end-of-stream, or a read error.
///
/// Cancellation is the local close: the read half is dropped with this
/// task, which is what unblocks a pending read. On end-of-stream or error
/// the dispatcher is asked to stop through the shared rendezvous.
pub(crate) async fn run(
    mut reader: ConnectionReader,
    inbox: mpsc::Sender<Bytes>,
    shutdown: ShutdownHandle,
    cancel: CancellationToken,
) {
    loop {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Reader cancelled");
                return;
            }
            result = reader.read_line() => result,
        };

        match result {
            Ok(Some(line)) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!("Reader cancelled");
                        return;
                    }
                    sent = inbox.send(line) => {
                        if sent.is_err() {
                            debug!("Inbox closed, reader exiting");
                            return;
                        }
                    }
                }
            }
            Ok(None) => {
                info!("Server closed the connection");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Read failed, closing session");
                break;
            }
        }
    }

    // The inbox stays open until the dispatcher has drained it and acked.
    shutdown.request(ShutdownOrigin::ConnectionLost).await;
}
