//! Configuration validation.
//!
//! Validates configuration at startup so bad identity values fail before
//! anything is written to the wire.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.address is required")]
    MissingAddress,
    #[error("server.nickname is required")]
    MissingNickname,
    #[error("server.nickname must not contain spaces or start with ':', got '{0}'")]
    InvalidNickname(String),
    #[error("server.{0} must not contain CR, LF or NUL")]
    ControlCharacter(&'static str),
    #[error("session.{0} must be greater than zero")]
    ZeroCapacity(&'static str),
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n', '\0'])
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let server = &config.server;

    if server.address.trim().is_empty() {
        errors.push(ValidationError::MissingAddress);
    }

    if server.nickname.is_empty() {
        errors.push(ValidationError::MissingNickname);
    } else if server.nickname.contains(' ') || server.nickname.starts_with(':') {
        errors.push(ValidationError::InvalidNickname(server.nickname.clone()));
    }

    for (field, value) in [
        ("address", &server.address),
        ("nickname", &server.nickname),
        ("real_name", &server.real_name),
    ] {
        if has_line_break(value) {
            errors.push(ValidationError::ControlCharacter(field));
        }
    }

    let session = &config.session;
    for (field, value) in [
        ("inbox_capacity", session.inbox_capacity),
        ("max_inflight_handlers", session.max_inflight_handlers),
        ("event_capacity", session.event_capacity),
        ("max_line_len", session.max_line_len),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroCapacity(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogConfig, ServerConfig, SessionConfig};

    fn config(nickname: &str, real_name: &str) -> Config {
        Config {
            server: ServerConfig {
                address: "irc.example.net:6667".to_string(),
                nickname: nickname.to_string(),
                real_name: real_name.to_string(),
            },
            session: SessionConfig::default(),
            log: LogConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(validate(&config("heppu", "Heppu Bot")), Ok(()));
    }

    #[test]
    fn test_real_name_may_contain_spaces() {
        assert!(validate(&config("bot", "A Bot With Spaces")).is_ok());
    }

    #[test]
    fn test_nickname_rules() {
        assert_eq!(
            validate(&config("", "x")),
            Err(vec![ValidationError::MissingNickname])
        );
        assert_eq!(
            validate(&config(":bot", "x")),
            Err(vec![ValidationError::InvalidNickname(":bot".to_string())])
        );
    }

    #[test]
    fn test_line_breaks_rejected() {
        let errors = validate(&config("bot", "evil\r\nQUIT")).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ControlCharacter("real_name")]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut cfg = config("bot", "x");
        cfg.session.inbox_capacity = 0;
        cfg.session.max_inflight_handlers = 0;
        let errors = validate(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroCapacity("inbox_capacity"),
                ValidationError::ZeroCapacity("max_inflight_handlers"),
            ]
        );
    }
}
