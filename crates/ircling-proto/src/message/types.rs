/// A parsed IRC message.
///
/// `prefix` and `trailing` distinguish "absent" (`None`) from "present but
/// empty" (`Some(String::new())`): `PRIVMSG #c :` carries an empty trailing,
/// `PRIVMSG #c ` carries none.
///
/// # Example
///
/// ```
/// use ircling_proto::Message;
///
/// let msg = Message::new("PRIVMSG")
///     .with_param("#rust")
///     .with_trailing("hello there");
/// assert_eq!(msg.to_string(), "PRIVMSG #rust :hello there");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Message {
    /// Origin of the message (e.g., `nick!user@host`), without the `:`.
    pub prefix: Option<String>,
    /// Textual or numeric command token.
    pub command: String,
    /// Middle parameters in wire order.
    pub params: Vec<String>,
    /// Final parameter introduced by `:`; may contain spaces.
    pub trailing: Option<String>,
}

impl Message {
    /// Create a message with only a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params: Vec::new(),
            trailing: None,
        }
    }

    /// Set the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a middle parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the trailing parameter.
    #[must_use]
    pub fn with_trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }

    /// Case-insensitive command comparison.
    pub fn is_command(&self, name: &str) -> bool {
        self.command.eq_ignore_ascii_case(name)
    }

    /// True for three-digit numeric replies such as `001`.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// Get the nickname part of a `nick!user@host` prefix.
    ///
    /// Server-name prefixes (containing `.` and no `!`) yield `None`.
    pub fn source_nickname(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        match prefix.find('!') {
            Some(end) => Some(&prefix[..end]),
            None if prefix.contains('.') => None,
            None => Some(prefix),
        }
    }

    /// Positional argument, counting the trailing parameter as the last one.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        match self.params.get(idx) {
            Some(param) => Some(param.as_str()),
            None if idx == self.params.len() => self.trailing.as_deref(),
            None => None,
        }
    }

    /// The last argument: the trailing parameter if present, else the last
    /// middle parameter.
    pub fn last_arg(&self) -> Option<&str> {
        self.trailing
            .as_deref()
            .or_else(|| self.params.last().map(String::as_str))
    }
}
