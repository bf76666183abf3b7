//! Core handler infrastructure.
//!
//! The [`Handler`] trait, the [`Context`] each invocation receives, and the
//! [`Registry`] the dispatcher routes through.

pub mod context;
pub mod registry;

pub use context::{Context, Handler, HandlerError, HandlerResult};
pub use registry::Registry;
