//! Referee command parsing.

use arbiter_core::{GameConfig, Promotion, Registry, Square};

use crate::error::RefereeError;

/// A parsed referee command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `new [variant] [total,increment]` -- start a fresh game.
    New(GameConfig),
    /// `fen` -- print the current position.
    Fen,
    /// `load <notation>` -- replace the position, keeping the variant.
    Load(String),
    /// `moves [square]` -- list legal moves, optionally for one square.
    Moves(Option<Square>),
    /// `move e2e4` or `move a7a8q` -- play a move, promoting if a letter follows.
    Move {
        from: Square,
        to: Square,
        promotion: Option<Promotion>,
    },
    /// `promote <q|r|b|n>` -- resolve a pending promotion.
    Promote(Promotion),
    /// `tick <seconds>` -- charge elapsed time to the side to move.
    Tick(u32),
    /// `show` -- print the board as a grid.
    Show,
    /// `quit` -- end the session.
    Quit,
}

/// Parse a single line of input into a [`Command`].
///
/// Returns `Ok(None)` for a blank line. Variant tokens of `new` are looked up
/// in `registry`.
pub fn parse_command(line: &str, registry: &Registry) -> Result<Option<Command>, RefereeError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name {
        "new" => Command::New(GameConfig::from_tokens(registry, args.iter().copied())?),
        "fen" => Command::Fen,
        "load" => {
            if args.is_empty() {
                return Err(RefereeError::MissingArgument { command: "load" });
            }
            Command::Load(args.join(" "))
        }
        "moves" => Command::Moves(args.first().map(|s| s.parse::<Square>()).transpose()?),
        "move" => parse_move(args.first().ok_or(RefereeError::MissingArgument { command: "move" })?)?,
        "promote" => {
            let choice = args
                .first()
                .ok_or(RefereeError::MissingArgument { command: "promote" })?;
            Command::Promote(choice.parse()?)
        }
        "tick" => {
            let seconds = args
                .first()
                .ok_or(RefereeError::MissingArgument { command: "tick" })?;
            Command::Tick(seconds.parse().map_err(|_| RefereeError::InvalidSeconds {
                found: seconds.to_string(),
            })?)
        }
        "show" => Command::Show,
        "quit" => Command::Quit,
        other => {
            return Err(RefereeError::UnknownCommand {
                command: other.to_string(),
            });
        }
    };
    Ok(Some(command))
}

/// Parse `e2e4`, with an optional promotion letter as in `a7a8q`.
fn parse_move(text: &str) -> Result<Command, RefereeError> {
    let invalid = || RefereeError::InvalidMoveText {
        found: text.to_string(),
    };
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }
    let from = Square::from_algebraic(&text[0..2]).ok_or_else(invalid)?;
    let to = Square::from_algebraic(&text[2..4]).ok_or_else(invalid)?;
    let promotion = match text.get(4..) {
        Some("") | None => None,
        Some(letter) => Some(letter.parse::<Promotion>()?),
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}
