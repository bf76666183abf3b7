//! PING handler.

use crate::handlers::{Context, Handler, HandlerResult};
use async_trait::async_trait;
use ircling_proto::Message;
use tracing::debug;

/// Answers server PINGs so the connection is not dropped as idle.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &Context, msg: &Message) -> HandlerResult {
        // PING [:<token>]; echo the token when there is one
        let token = msg.last_arg();
        debug!(token = ?token, "Answering PING");
        ctx.outbox.pong(token).await?;
        Ok(())
    }
}
