//! Referee protocol errors.

use arbiter_core::{ConfigError, FenError, MoveError};

/// Errors that can occur while handling a referee command.
#[derive(Debug, thiserror::Error)]
pub enum RefereeError {
    /// The first word of the line is not a known command.
    #[error("unknown command: {command}")]
    UnknownCommand {
        /// The unrecognized command word.
        command: String,
    },

    /// A command was given without a required argument.
    #[error("{command} needs an argument")]
    MissingArgument {
        /// The command missing its argument.
        command: &'static str,
    },

    /// A move was not written as two squares, e.g. `e2e4`.
    #[error("invalid move text: {found}")]
    InvalidMoveText {
        /// The text that failed to parse.
        found: String,
    },

    /// `tick` was given something other than a whole number of seconds.
    #[error("invalid seconds: {found}")]
    InvalidSeconds {
        /// The text that failed to parse.
        found: String,
    },

    /// `promote` was sent while no pawn stands on its last rank.
    #[error("no pawn is waiting to promote")]
    NothingToPromote,

    /// A position or square could not be parsed.
    #[error(transparent)]
    Fen(#[from] FenError),

    /// A move or promotion was refused.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// A `new` command named an unknown variant or a malformed clock.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An I/O error occurred while reading input or writing a reply.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
