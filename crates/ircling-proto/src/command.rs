//! Typed builders for the commands the client sends.
//!
//! Each variant carries exactly the fields its wire form needs, and
//! [`Display`] renders the line without a terminator (the line codec
//! appends CRLF).

use std::fmt::{self, Display, Formatter};

use crate::error::ProtocolError;

/// Credential sent in `PASS` when the server needs none.
pub const ANONYMOUS_PASSWORD: &str = "*";

/// An outbound client command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PASS <password>`
    Pass(String),
    /// `NICK <nickname>`
    Nick(String),
    /// `USER <username> 0 * :<realname>`
    User {
        /// Username (the client reuses its nickname).
        username: String,
        /// Free-form real name.
        realname: String,
    },
    /// `JOIN <channel>`
    Join(String),
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nickname.
        target: String,
        /// Message body; may contain spaces.
        text: String,
    },
    /// `PONG` or `PONG :<token>`
    Pong(Option<String>),
    /// `QUIT` or `QUIT :<reason>`
    Quit(Option<String>),
}

impl Command {
    /// `PASS *`
    pub fn pass_anonymous() -> Self {
        Command::Pass(ANONYMOUS_PASSWORD.to_string())
    }

    /// `NICK <nickname>`
    pub fn nick(nickname: &str) -> Self {
        Command::Nick(nickname.to_string())
    }

    /// `USER <nickname> 0 * :<realname>`
    pub fn user(nickname: &str, realname: &str) -> Self {
        Command::User {
            username: nickname.to_string(),
            realname: realname.to_string(),
        }
    }

    /// `JOIN <channel>`
    pub fn join(channel: &str) -> Self {
        Command::Join(channel.to_string())
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: &str, text: &str) -> Self {
        Command::Privmsg {
            target: target.to_string(),
            text: text.to_string(),
        }
    }

    /// `PONG`, echoing the PING token when there is one.
    pub fn pong(token: Option<&str>) -> Self {
        Command::Pong(token.map(str::to_string))
    }

    /// `QUIT`, with an optional reason.
    pub fn quit(reason: Option<&str>) -> Self {
        Command::Quit(reason.map(str::to_string))
    }

    /// The command verb.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Pass(_) => "PASS",
            Command::Nick(_) => "NICK",
            Command::User { .. } => "USER",
            Command::Join(_) => "JOIN",
            Command::Privmsg { .. } => "PRIVMSG",
            Command::Pong(_) => "PONG",
            Command::Quit(_) => "QUIT",
        }
    }

    /// Check that every middle parameter renders as exactly one parameter.
    ///
    /// Trailing fields may hold anything but CR, LF and NUL, which the line
    /// codec rejects on its own.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Command::Pass(value) | Command::Nick(value) | Command::Join(value) => {
                check_middle(self.name(), value)
            }
            Command::User { username, .. } => check_middle(self.name(), username),
            Command::Privmsg { target, .. } => check_middle(self.name(), target),
            Command::Pong(_) | Command::Quit(_) => Ok(()),
        }
    }
}

fn check_middle(command: &'static str, value: &str) -> Result<(), ProtocolError> {
    if value.is_empty() || value.starts_with(':') || value.contains(' ') {
        return Err(ProtocolError::InvalidParameter {
            command,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(password) => write!(f, "PASS {}", password),
            Command::Nick(nickname) => write!(f, "NICK {}", nickname),
            Command::User { username, realname } => {
                write!(f, "USER {} 0 * :{}", username, realname)
            }
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Privmsg { target, text } => write!(f, "PRIVMSG {} :{}", target, text),
            Command::Pong(None) => f.write_str("PONG"),
            Command::Pong(Some(token)) => write!(f, "PONG :{}", token),
            Command::Quit(None) => f.write_str("QUIT"),
            Command::Quit(Some(reason)) => write!(f, "QUIT :{}", reason),
        }
    }
}
