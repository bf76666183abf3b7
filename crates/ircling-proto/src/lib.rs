//! # ircling-proto
//!
//! Protocol layer of the ircling client: the structured [`Message`] model,
//! a byte-level line parser, typed builders for the commands the client
//! emits, and a tokio line codec.
//!
//! ## Parsing
//!
//! ```rust
//! use ircling_proto::{parse, Message};
//!
//! let msg = parse(b"PRIVMSG #chan :hello world").unwrap();
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.params, vec!["#chan".to_string()]);
//! assert_eq!(msg.trailing.as_deref(), Some("hello world"));
//!
//! let ping: Message = ":nick!user@host PING".parse().unwrap();
//! assert_eq!(ping.prefix.as_deref(), Some("nick!user@host"));
//! ```
//!
//! ## Building outbound lines
//!
//! ```rust
//! use ircling_proto::Command;
//!
//! assert_eq!(Command::user("bot", "A Bot").to_string(), "USER bot 0 * :A Bot");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;

pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, DEFAULT_MAX_LINE_LEN};
pub use self::message::{parse, Message};
