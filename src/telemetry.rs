//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from `[log] level`)
/// is used as the filter directive.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: a second call (tests, embedding) must not panic.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span covering one session from connect to shutdown.
    pub fn session(address: &str, nick: &str) -> Span {
        info_span!("session", address = %address, nick = %nick)
    }

    /// Span covering one handler invocation.
    pub fn command(name: &str, source: Option<&str>) -> Span {
        if let Some(source) = source {
            info_span!("irc.command", name = %name, source = %source)
        } else {
            info_span!("irc.command", name = %name)
        }
    }
}
