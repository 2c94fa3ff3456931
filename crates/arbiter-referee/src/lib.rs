//! Line-oriented text protocol that referees one game of arbiter chess.

pub mod command;
pub mod error;
pub mod referee;

pub use command::{Command, parse_command};
pub use error::RefereeError;
pub use referee::Referee;
