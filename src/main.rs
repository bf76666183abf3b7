//! ircling - interactive IRC client.
//!
//! Usage: `ircling [config.toml]` (defaults to `ircling.toml`).

mod cli;

use ircling::Session;
use ircling::config::Config;
use ircling::telemetry::init_tracing;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ircling.toml".to_string());

    let config = match Config::load(&config_path) {
        Ok(config) => {
            init_tracing(&config.log.level);
            config
        }
        Err(e) => {
            init_tracing("info");
            error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    info!(
        address = %config.server.address,
        nick = %config.server.nickname,
        "Starting ircling"
    );

    let session = Session::connect(&config).await.map_err(|e| {
        error!(address = %config.server.address, error = %e, "Failed to connect");
        e
    })?;

    cli::run(session).await?;

    info!("Goodbye");
    Ok(())
}
