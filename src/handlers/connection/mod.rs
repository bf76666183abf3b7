//! Connection keepalive handlers.

mod ping;

pub use ping::PingHandler;
