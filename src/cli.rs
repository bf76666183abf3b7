//! Interactive front end: stdin commands in, timestamped traffic out.
//!
//! ```text
//! /connect            register (PASS, NICK, USER)      alias: c
//! /join <chan>        join a channel                   alias: j
//! /msg <chan> <text>  message a channel
//! /raw <line>         send a line verbatim
//! /quit [reason]      leave and exit
//! <text>              message the last joined channel  alias: h <text>
//! ```

use chrono::Local;
use ircling::Session;
use ircling::error::WriteError;
use ircling_proto::Message;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::warn;

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Register,
    Join(&'a str),
    Message { target: &'a str, text: &'a str },
    Say(&'a str),
    Raw(&'a str),
    Quit(Option<&'a str>),
    Usage(&'static str),
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Empty;
        }

        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match word {
            "/connect" | "c" => Self::Register,
            "/join" | "j" => match arg {
                Some(channel) => Self::Join(channel),
                None => Self::Usage("/join <channel>"),
            },
            "/msg" => match rest.split_once(' ') {
                Some((target, text)) if !text.is_empty() => Self::Message { target, text },
                _ => Self::Usage("/msg <channel> <text>"),
            },
            "/raw" => match arg {
                Some(raw) => Self::Raw(raw),
                None => Self::Usage("/raw <line>"),
            },
            "/quit" => Self::Quit(arg),
            "h" => Self::Say(arg.unwrap_or("hello")),
            cmd if cmd.starts_with('/') => Self::Unknown(cmd),
            _ => Self::Say(line),
        }
    }
}

/// Drive the session from stdin until `/quit`, end of input, or the
/// server closing the connection.
pub async fn run(session: Session) -> anyhow::Result<()> {
    let session = Arc::new(session);
    let printer = tokio::spawn(print_events(session.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut channel: Option<String> = None;
    let mut reason: Option<String> = None;

    loop {
        let line = tokio::select! {
            _ = session.stopped() => {
                println!("{} -!- connection closed", timestamp());
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        match Input::parse(&line) {
            Input::Empty => {}
            Input::Register => {
                report(session.register().await);
            }
            Input::Join(target) => {
                if report(session.join(target).await) {
                    channel = Some(target.to_string());
                }
            }
            Input::Message { target, text } => {
                report(session.send_message(target, text).await);
            }
            Input::Say(text) => match &channel {
                Some(target) => {
                    report(session.send_message(target, text).await);
                }
                None => eprintln!("not in a channel; use /join <channel> first"),
            },
            Input::Raw(raw) => {
                report(session.send_raw(raw).await);
            }
            Input::Quit(text) => {
                reason = text.map(str::to_string);
                break;
            }
            Input::Usage(usage) => eprintln!("usage: {usage}"),
            Input::Unknown(cmd) => eprintln!("unknown command: {cmd}"),
        }
    }

    session.disconnect(reason.as_deref()).await;
    printer.abort();
    Ok(())
}

/// Print a write failure; returns whether the write succeeded.
fn report(result: Result<(), WriteError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("send failed: {e}");
            false
        }
    }
}

async fn print_events(mut events: broadcast::Receiver<Message>) {
    loop {
        match events.recv().await {
            Ok(msg) => println!("{} {}", timestamp(), render(&msg)),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "Output fell behind, messages skipped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn render(msg: &Message) -> String {
    if msg.is_command("PRIVMSG") {
        let source = msg.source_nickname().unwrap_or("*");
        let target = msg.arg(0).unwrap_or("");
        let text = msg.trailing.as_deref().unwrap_or("");
        format!("{target} <{source}> {text}")
    } else if msg.is_numeric() {
        let server = msg.prefix.as_deref().unwrap_or("*");
        let text = msg.trailing.as_deref().unwrap_or("");
        format!("-{server}- {} {text}", msg.command)
    } else {
        msg.to_string()
    }
}
