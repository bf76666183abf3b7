//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_event_capacity, default_inbox_capacity, default_log_level, default_max_inflight_handlers,
    default_max_line_len,
};
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to and the identity to register with.
    pub server: ServerConfig,
    /// Session tuning.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Check values that deserialize fine but would break the session.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate(self)
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server address and client identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `host:port` of the IRC server (e.g., "irc.ca.ircnet.net:6667").
    pub address: String,
    /// Nickname sent in NICK and as the USER username.
    pub nickname: String,
    /// Real name sent in USER.
    pub real_name: String,
}

/// Reader/dispatcher tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Raw lines buffered between the reader and the dispatcher.
    #[serde(default = "default_inbox_capacity")]
    pub inbox_capacity: usize,
    /// Handler tasks allowed to run at once.
    #[serde(default = "default_max_inflight_handlers")]
    pub max_inflight_handlers: usize,
    /// Parsed messages buffered per subscriber before it starts lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Longest accepted inbound line in bytes.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: default_inbox_capacity(),
            max_inflight_handlers: default_max_inflight_handlers(),
            event_capacity: default_event_capacity(),
            max_line_len: default_max_line_len(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
