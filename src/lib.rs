//! ircling - a minimal IRC client library.
//!
//! A [`Session`] owns one server connection. A reader task feeds raw lines
//! to a dispatcher, which parses them with [`ircling_proto::parse`] and runs
//! registered [`handlers`] concurrently. [`Session::quit`] tears the tasks
//! down through a two-phase shutdown handshake.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ircling::config::Config::load("ircling.toml")?;
//! let session = ircling::Session::connect(&config).await?;
//! session.register().await?;
//! session.join("#heppu").await?;
//! session.send_message("#heppu", "hello").await?;
//! session.quit().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod session;
pub mod telemetry;

pub use session::{Identity, Outbox, Session};
