//! Integration test common infrastructure.
//!
//! Provides a scripted fake IRC server, session setup helpers, and a
//! recording handler for asserting on dispatch.

pub mod server;

#[allow(unused_imports)]
pub use server::{FakeServer, ServerConn};

use async_trait::async_trait;
use ircling::Session;
use ircling::config::Config;
use ircling::handlers::{Context, Handler, HandlerResult, Registry};
use ircling_proto::Message;
use tokio::sync::mpsc;

/// Config pointing at `address` with the nick used throughout the tests.
#[allow(dead_code)]
pub fn test_config(address: &str) -> Config {
    format!(
        "[server]\naddress = \"{address}\"\nnickname = \"heppu\"\nreal_name = \"Heppu Bot\"\n"
    )
    .parse()
    .expect("Test config should be valid")
}

/// Start a fake server and a session connected to it.
#[allow(dead_code)]
pub async fn connected(config_fn: impl FnOnce(&mut Config), registry: Registry) -> (Session, ServerConn) {
    let server = FakeServer::bind().await.expect("Failed to bind fake server");
    let mut config = test_config(&server.address());
    config_fn(&mut config);

    let (session, conn) = tokio::join!(
        Session::connect_with_registry(&config, registry),
        server.accept()
    );
    (
        session.expect("Failed to connect session"),
        conn.expect("Failed to accept session"),
    )
}

/// Handler that forwards every message it sees to a channel.
#[allow(dead_code)]
pub struct Recorder {
    seen: mpsc::UnboundedSender<Message>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { seen: tx }, rx)
    }
}

#[async_trait]
impl Handler for Recorder {
    async fn handle(&self, _ctx: &Context, msg: &Message) -> HandlerResult {
        let _ = self.seen.send(msg.clone());
        Ok(())
    }
}
