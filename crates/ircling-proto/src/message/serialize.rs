use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Wire form without the line terminator.
///
/// When there is no trailing parameter, the last middle parameter is still
/// closed with a space so the output re-parses to an equal message.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        f.write_str(&self.command)?;

        for param in &self.params {
            write!(f, " {}", param)?;
        }

        match self.trailing {
            Some(ref trailing) => write!(f, " :{}", trailing),
            None if !self.params.is_empty() => f.write_str(" "),
            None => Ok(()),
        }
    }
}
