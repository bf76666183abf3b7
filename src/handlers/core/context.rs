//! Handler context and core types.
//!
//! Defines the [`Context`] passed to every handler invocation and the
//! [`Handler`] trait itself. Handlers run on their own tasks, so the context
//! is owned and cheap to clone rather than borrowed from the dispatcher.

use crate::error::WriteError;
use crate::session::{Identity, Outbox};
use async_trait::async_trait;
use ircling_proto::Message;
use std::sync::Arc;
use thiserror::Error;

/// Handler context passed to each command handler.
#[derive(Clone)]
pub struct Context {
    /// Serialized writer shared with the session.
    pub outbox: Outbox,
    /// Who this session registered as.
    pub identity: Arc<Identity>,
}

impl Context {
    /// Create a new context.
    pub fn new(outbox: Outbox, identity: Arc<Identity>) -> Self {
        Self { outbox, identity }
    }
}

/// Errors returned by handlers. Logged by the dispatcher; never fatal to
/// the session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HandlerError {
    #[error("send error: {0}")]
    Write(#[from] WriteError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// A command handler.
///
/// One invocation per parsed message whose command matches the handler's
/// registry key. Invocations for different messages may run concurrently.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context, msg: &Message) -> HandlerResult;
}
