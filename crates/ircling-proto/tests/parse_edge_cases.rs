//! Integration tests for parser edge cases.
//!
//! Each case pins one boundary of the line grammar: prefix handling,
//! command termination, parameter termination, and trailing content.

use ircling_proto::{parse, Message, MessageParseError};

#[test]
fn test_documented_examples() {
    assert_eq!(parse(b""), Err(MessageParseError::EmptyMessage));

    assert_eq!(
        parse(b":nick!user@host PING"),
        Ok(Message {
            prefix: Some("nick!user@host".to_string()),
            command: "PING".to_string(),
            params: vec![],
            trailing: None,
        })
    );

    assert_eq!(
        parse(b"PRIVMSG #chan :hello world"),
        Ok(Message {
            prefix: None,
            command: "PRIVMSG".to_string(),
            params: vec!["#chan".to_string()],
            trailing: Some("hello world".to_string()),
        })
    );

    assert_eq!(parse(b": PING"), Err(MessageParseError::EmptyPrefix));
    assert_eq!(parse(b":onlyprefix"), Err(MessageParseError::MissingCommand));
}

#[test]
fn test_error_table() {
    let cases = [
        ("", MessageParseError::EmptyMessage, "empty line"),
        ("\r\n", MessageParseError::EmptyMessage, "terminator only"),
        (": ", MessageParseError::EmptyPrefix, "empty prefix, nothing else"),
        (":server", MessageParseError::MissingCommand, "prefix never ends"),
        (":server ", MessageParseError::MissingCommandSpace, "prefix then end"),
        ("JOIN #a", MessageParseError::MalformedParams, "open parameter"),
        ("CMD a b", MessageParseError::MalformedParams, "two params, last open"),
    ];

    for (line, expected, description) in cases {
        assert_eq!(parse(line.as_bytes()), Err(expected), "{description}");
    }
}

#[test]
fn test_single_colon_prefix_is_not_empty() {
    let msg = parse(b":: PING").unwrap();
    assert_eq!(msg.prefix.as_deref(), Some(":"));
    assert_eq!(msg.command, "PING");
}

#[test]
fn test_bare_commands_are_valid() {
    for line in ["PING", "PONG", "QUIT", "001"] {
        let msg = parse(line.as_bytes()).unwrap_or_else(|e| panic!("{line}: {e}"));
        assert_eq!(msg.command, line);
        assert!(msg.params.is_empty());
        assert_eq!(msg.trailing, None);
    }
}

#[test]
fn test_zero_parameters_with_trailing() {
    let msg = parse(b"PING :token123").unwrap();
    assert!(msg.params.is_empty());
    assert_eq!(msg.trailing.as_deref(), Some("token123"));
}

#[test]
fn test_empty_and_absent_trailing_differ() {
    let empty = parse(b"AWAY #x :").unwrap();
    let absent = parse(b"AWAY #x ").unwrap();
    assert_eq!(empty.trailing, Some(String::new()));
    assert_eq!(absent.trailing, None);
    assert_ne!(empty, absent);
}

#[test]
fn test_trailing_may_start_with_space() {
    let msg = parse(b"PRIVMSG #c : spaced out").unwrap();
    assert_eq!(msg.trailing.as_deref(), Some(" spaced out"));
}

#[test]
fn test_server_welcome_burst_lines() {
    let lines: [&[u8]; 4] = [
        b":irc.example.net 001 ircling :Welcome to the network ircling",
        b":irc.example.net 375 ircling :- irc.example.net Message of the Day -",
        b":irc.example.net NOTICE * :*** Looking up your hostname...",
        b"PING :irc.example.net",
    ];

    for line in lines {
        let msg = parse(line).unwrap_or_else(|e| panic!("{}: {e}", String::from_utf8_lossy(line)));
        assert!(msg.trailing.is_some());
    }
}

#[test]
fn test_error_messages_are_descriptive() {
    let errors = [
        MessageParseError::EmptyMessage,
        MessageParseError::EmptyPrefix,
        MessageParseError::MissingCommand,
        MessageParseError::MissingCommandSpace,
        MessageParseError::MalformedParams,
        MessageParseError::InvalidUtf8 { byte_pos: 3 },
    ];

    for err in errors {
        assert!(!err.to_string().is_empty());
    }
}
