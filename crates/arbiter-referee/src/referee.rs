//! The referee loop: reads commands line by line and keeps one game.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use arbiter_core::{Board, Color, GameConfig, MoveError, MoveKind, MoveOutcome, Registry, Square};

use crate::command::{Command, parse_command};
use crate::error::RefereeError;

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Referee for a single game, writing replies to `out`.
///
/// A command that fails leaves the game exactly as it was.
pub struct Referee<W> {
    registry: Registry,
    board: Board,
    out: W,
}

impl<W: Write> Referee<W> {
    /// Create a referee holding a standard game from the starting position.
    pub fn new(out: W) -> Self {
        Self::with_registry(Registry::standard(), out)
    }

    /// Create a referee whose `new` and `load` commands use `registry`.
    pub fn with_registry(registry: Registry, out: W) -> Self {
        Self {
            registry,
            board: Board::new_game(registry, &GameConfig::default()),
            out,
        }
    }

    /// The game being refereed.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The output sink replies are written to.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Command errors are reported on the output and the loop carries on;
    /// only I/O failures end it early.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), RefereeError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");
            match self.execute(trimmed) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e @ RefereeError::Io { .. }) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "command failed");
                    writeln!(self.out, "error: {e}")?;
                }
            }
            self.out.flush()?;
        }
        info!("referee shutting down");
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Flow, RefereeError> {
        let Some(command) = parse_command(line, &self.registry)? else {
            return Ok(Flow::Continue);
        };
        match command {
            Command::New(config) => {
                self.board = Board::new_game(self.registry, &config);
                info!(variant = %config.variant, clock = ?config.clock, "new game");
                writeln!(self.out, "{}", self.board)?;
            }
            Command::Fen => writeln!(self.out, "{}", self.board)?,
            Command::Load(fen) => {
                self.board = Board::from_fen_with(self.registry, self.board.variant(), &fen)?;
                info!(fen = %self.board, "position loaded");
                writeln!(self.out, "{}", self.board)?;
            }
            Command::Moves(square) => self.list_moves(square)?,
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let mut board = self.board.clone();
                let mut outcome = board.try_play_move(from, to)?;
                if let Some(choice) = promotion {
                    let promoted = board.try_promote(to, choice)?;
                    outcome = MoveOutcome {
                        kind: outcome.kind,
                        is_castling: outcome.is_castling,
                        ..promoted
                    };
                }
                self.board = board;
                self.report(&outcome)?;
            }
            Command::Promote(choice) => {
                let square = self
                    .board
                    .pending_promotion()
                    .map(|id| self.board.piece(id).square())
                    .ok_or(RefereeError::NothingToPromote)?;
                let outcome = self.board.try_promote(square, choice)?;
                self.report(&outcome)?;
            }
            Command::Tick(seconds) => {
                if self.board.clock().is_none() {
                    writeln!(self.out, "no clock")?;
                    return Ok(Flow::Continue);
                }
                let flagged = self.board.tick(seconds);
                write!(
                    self.out,
                    "remaining w {} b {}",
                    self.board.remaining(Color::White),
                    self.board.remaining(Color::Black)
                )?;
                if let Some(winner) = flagged {
                    info!(%winner, "flag fell");
                    write!(self.out, " winner {winner}")?;
                }
                writeln!(self.out)?;
            }
            Command::Show => writeln!(self.out, "{}", self.board.pretty())?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// One line per piece of the side to move: `e2: e3 e4`.
    fn list_moves(&mut self, square: Option<Square>) -> Result<(), RefereeError> {
        let mut origins: Vec<Square> = match square {
            Some(sq) => {
                if self.board.piece_at(sq).is_none() {
                    return Err(MoveError::EmptySquare { square: sq }.into());
                }
                vec![sq]
            }
            None => self
                .board
                .team(self.board.side_to_move())
                .pieces()
                .iter()
                .map(|&id| self.board.piece(id))
                .filter(|p| !p.moves().is_empty())
                .map(|p| p.square())
                .collect(),
        };
        origins.sort_by_key(|sq| sq.index());

        for origin in origins {
            let Some(piece) = self.board.piece_on(origin) else {
                continue;
            };
            let destinations: Vec<String> = piece.moves().map(|sq| sq.to_string()).collect();
            writeln!(self.out, "{origin}: {}", destinations.join(" "))?;
        }
        Ok(())
    }

    fn report(&mut self, outcome: &MoveOutcome) -> Result<(), RefereeError> {
        let mut words = vec!["ok".to_string()];
        if outcome.kind == MoveKind::Captured {
            words.push("capture".to_string());
        }
        if outcome.is_castling {
            words.push("castle".to_string());
        }
        if let Some(kind) = outcome.promoted {
            words.push(format!("promoted {kind}"));
        }
        if outcome.blast_win {
            words.push("blast".to_string());
        }
        if outcome.is_check {
            words.push("check".to_string());
        }
        if outcome.should_promote {
            words.push("promote".to_string());
        }
        if let Some(winner) = outcome.winner {
            info!(%winner, "game decided");
            words.push(format!("winner {winner}"));
        }
        if outcome.stalemate {
            info!("stalemate");
            words.push("stalemate".to_string());
        }
        writeln!(self.out, "{}", words.join(" "))?;
        Ok(())
    }
}
