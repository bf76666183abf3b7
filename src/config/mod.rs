//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and TOML loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup checks on loaded values

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, LogConfig, ServerConfig, SessionConfig};
pub use validation::{ValidationError, validate};
