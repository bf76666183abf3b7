//! Command handler registry.
//!
//! Maps command names, stored upper-case, to handlers. The built-in table only
//! answers PING; callers can add or replace entries before the session
//! starts.

use super::context::Handler;
use crate::handlers::connection::PingHandler;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl Registry {
    /// Create a registry with the built-in handlers registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Connection keepalive
        registry.register("PING", PingHandler);

        registry
    }

    /// Create a registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `command`, replacing any existing entry.
    ///
    /// `command` is matched case-insensitively.
    pub fn register(&mut self, command: &str, handler: impl Handler + 'static) {
        self.handlers.insert(command.to_ascii_uppercase(), Arc::new(handler));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_handler(mut self, command: &str, handler: impl Handler + 'static) -> Self {
        self.register(command, handler);
        self
    }

    /// Look up the handler for a received command (case-insensitive).
    pub fn get(&self, command: &str) -> Option<Arc<dyn Handler>> {
        if let Some(handler) = self.handlers.get(command) {
            return Some(Arc::clone(handler));
        }
        self.handlers.get(&command.to_ascii_uppercase()).cloned()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
