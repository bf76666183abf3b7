//! Command handlers.
//!
//! The dispatcher looks each parsed message up in a [`Registry`] and runs
//! the matching [`Handler`] on its own task.

mod connection;
mod core;

pub use self::connection::PingHandler;
pub use self::core::{Context, Handler, HandlerError, HandlerResult, Registry};
