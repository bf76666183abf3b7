//! Byte-level message parser.
//!
//! Grammar (one line, line terminator excluded):
//!
//! ```text
//! [':' prefix SPACE] command [SPACE param]* [SPACE ':' trailing]
//! ```
//!
//! The scanner walks the line once with a cursor and never backtracks. A
//! middle parameter is only complete once a space closes it; a line that
//! ends inside an open parameter is rejected with
//! [`MessageParseError::MalformedParams`]. A command that runs to the end of
//! the line is a valid command-only message (bare `PING`).

use std::str::FromStr;

use crate::error::MessageParseError;

use super::types::Message;

const PREFIX_MARKER: u8 = b':';
const SPACE: u8 = b' ';

/// Parse one raw line into a [`Message`].
///
/// A single trailing `\n` or `\r\n` is ignored, so lines can be passed
/// straight from a reader that keeps terminators.
pub fn parse(raw_line: &[u8]) -> Result<Message, MessageParseError> {
    let line = strip_line_ending(raw_line);
    if line.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let mut cursor = 0;
    let mut prefix = None;

    if line[0] == PREFIX_MARKER {
        let end = find_space(line, 1).ok_or(MessageParseError::MissingCommand)?;
        if end == 1 {
            return Err(MessageParseError::EmptyPrefix);
        }
        prefix = Some(field(line, 1, end)?);
        cursor = end + 1;
    }

    if cursor >= line.len() {
        return Err(MessageParseError::MissingCommandSpace);
    }

    let Some(command_end) = find_space(line, cursor) else {
        return Ok(Message {
            prefix,
            command: field(line, cursor, line.len())?,
            params: Vec::new(),
            trailing: None,
        });
    };

    if command_end == cursor {
        return Err(MessageParseError::MissingCommand);
    }
    let command = field(line, cursor, command_end)?;
    cursor = command_end + 1;

    let mut params = Vec::new();
    let mut trailing = None;
    let mut boundary = cursor;

    while cursor < line.len() {
        match line[cursor] {
            PREFIX_MARKER if cursor == boundary => {
                trailing = Some(field(line, cursor + 1, line.len())?);
                break;
            }
            SPACE => {
                params.push(field(line, boundary, cursor)?);
                boundary = cursor + 1;
            }
            _ => {}
        }
        cursor += 1;
    }

    if trailing.is_none() && boundary < line.len() {
        return Err(MessageParseError::MalformedParams);
    }

    Ok(Message {
        prefix,
        command,
        params,
        trailing,
    })
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        parse(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = MessageParseError;

    fn try_from(raw_line: &[u8]) -> Result<Message, Self::Error> {
        parse(raw_line)
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn find_space(line: &[u8], from: usize) -> Option<usize> {
    line[from..]
        .iter()
        .position(|&b| b == SPACE)
        .map(|offset| from + offset)
}

/// Decode `line[start..end]` as an owned UTF-8 string.
fn field(line: &[u8], start: usize, end: usize) -> Result<String, MessageParseError> {
    std::str::from_utf8(&line[start..end])
        .map(str::to_owned)
        .map_err(|e| MessageParseError::InvalidUtf8 {
            byte_pos: start + e.valid_up_to(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(b""), Err(MessageParseError::EmptyMessage));
        assert_eq!(parse(b"\r\n"), Err(MessageParseError::EmptyMessage));
        assert_eq!(parse(b"\n"), Err(MessageParseError::EmptyMessage));
    }

    #[test]
    fn test_parse_prefixed_bare_command() {
        let msg = parse(b":nick!user@host PING").unwrap();
        assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
        assert_eq!(msg.command, "PING");
        assert!(msg.params.is_empty());
        assert_eq!(msg.trailing, None);
    }

    #[test]
    fn test_parse_privmsg_with_trailing() {
        let msg = parse(b"PRIVMSG #chan :hello world").unwrap();
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#chan".to_string()]);
        assert_eq!(msg.trailing.as_deref(), Some("hello world"));
    }

    #[test]
    fn test_parse_empty_prefix() {
        assert_eq!(parse(b": PING"), Err(MessageParseError::EmptyPrefix));
    }

    #[test]
    fn test_parse_prefix_without_command() {
        assert_eq!(parse(b":onlyprefix"), Err(MessageParseError::MissingCommand));
        assert_eq!(parse(b":"), Err(MessageParseError::MissingCommand));
    }

    #[test]
    fn test_parse_prefix_then_end_of_line() {
        assert_eq!(
            parse(b":server.example "),
            Err(MessageParseError::MissingCommandSpace)
        );
    }

    #[test]
    fn test_parse_empty_command_token() {
        assert_eq!(parse(b" PING"), Err(MessageParseError::MissingCommand));
        assert_eq!(parse(b":nick  PING"), Err(MessageParseError::MissingCommand));
    }

    #[test]
    fn test_bare_command_is_valid() {
        let msg = parse(b"PING").unwrap();
        assert_eq!(msg.command, "PING");
        assert!(msg.params.is_empty());
        assert_eq!(msg.trailing, None);
        assert_eq!(msg.prefix, None);
    }

    #[test]
    fn test_command_followed_by_single_space() {
        let msg = parse(b"PONG ").unwrap();
        assert_eq!(msg.command, "PONG");
        assert!(msg.params.is_empty());
        assert_eq!(msg.trailing, None);
    }

    #[test]
    fn test_open_parameter_at_end_is_malformed() {
        assert_eq!(parse(b"JOIN #chan"), Err(MessageParseError::MalformedParams));
        assert_eq!(
            parse(b":srv 001 nick welcome"),
            Err(MessageParseError::MalformedParams)
        );
    }

    #[test]
    fn test_closed_parameters_without_trailing() {
        let msg = parse(b"MODE nick +i ").unwrap();
        assert_eq!(msg.params, vec!["nick".to_string(), "+i".to_string()]);
        assert_eq!(msg.trailing, None);
    }

    #[test]
    fn test_empty_trailing_is_present() {
        let msg = parse(b"PRIVMSG #chan :").unwrap();
        assert_eq!(msg.trailing.as_deref(), Some(""));
    }

    #[test]
    fn test_trailing_starting_with_space() {
        let msg = parse(b"PRIVMSG #chan :  indented text").unwrap();
        assert_eq!(msg.trailing.as_deref(), Some("  indented text"));
    }

    #[test]
    fn test_trailing_keeps_colons_and_spaces() {
        let msg = parse(b":a!b@c PRIVMSG #chan :see: this :thing").unwrap();
        assert_eq!(msg.trailing.as_deref(), Some("see: this :thing"));
    }

    #[test]
    fn test_trailing_without_middle_params() {
        let msg = parse(b"PING :irc.example.org").unwrap();
        assert!(msg.params.is_empty());
        assert_eq!(msg.trailing.as_deref(), Some("irc.example.org"));
    }

    #[test]
    fn test_colon_inside_parameter_is_literal() {
        let msg = parse(b"NOTICE a:b :text").unwrap();
        assert_eq!(msg.params, vec!["a:b".to_string()]);
        assert_eq!(msg.trailing.as_deref(), Some("text"));
    }

    #[test]
    fn test_consecutive_spaces_yield_empty_param() {
        let msg = parse(b"CMD a  :t").unwrap();
        assert_eq!(msg.params, vec!["a".to_string(), String::new()]);
        assert_eq!(msg.trailing.as_deref(), Some("t"));
    }

    #[test]
    fn test_duplicate_params_preserved_in_order() {
        let msg = parse(b"CMD x y x :end").unwrap();
        assert_eq!(
            msg.params,
            vec!["x".to_string(), "y".to_string(), "x".to_string()]
        );
    }

    #[test]
    fn test_line_terminators_stripped() {
        let crlf = parse(b"PRIVMSG #chan :hi\r\n").unwrap();
        let lf = parse(b"PRIVMSG #chan :hi\n").unwrap();
        assert_eq!(crlf, lf);
        assert_eq!(crlf.trailing.as_deref(), Some("hi"));
    }

    #[test]
    fn test_numeric_command() {
        let msg = parse(b":irc.example.org 001 nick :Welcome").unwrap();
        assert_eq!(msg.command, "001");
        assert!(msg.is_numeric());
        assert_eq!(msg.params, vec!["nick".to_string()]);
    }

    #[test]
    fn test_invalid_utf8_reports_position() {
        let err = parse(b"PRIVMSG #chan :caf\xff").unwrap_err();
        assert_eq!(err, MessageParseError::InvalidUtf8 { byte_pos: 18 });
    }

    #[test]
    fn test_from_str_and_try_from_agree() {
        let line = ":n!u@h PRIVMSG #c :x";
        let a: Message = line.parse().unwrap();
        let b = Message::try_from(line.as_bytes()).unwrap();
        assert_eq!(a, b);
    }
}
