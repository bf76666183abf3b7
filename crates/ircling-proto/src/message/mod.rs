//! IRC message types, parsing and serialization.

mod parse;
mod serialize;
mod types;

pub use self::parse::parse;
pub use self::types::Message;
