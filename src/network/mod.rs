//! Network module.
//!
//! Contains the TCP [`Connection`] and its split reader/writer halves.

mod connection;

pub use connection::{Connection, ConnectionReader, ConnectionWriter};
