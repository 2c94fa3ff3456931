//! Legal move generation.
//!
//! Moves are computed once per turn by [`Board::calculate_all_moves`] and
//! stored on the pieces of the side to move. Generation runs in passes:
//! a threat pass over the opposing pieces fills in denied squares, the check
//! mask and pins; a legal pass filters each piece's raw destinations through
//! those; castling is offered last.

mod castling;
mod scan;
mod threats;

use tracing::debug;

use crate::atomic;
use crate::board::Board;
use crate::color::Color;
use crate::piece::PieceId;
use crate::square_set::SquareSet;

pub(crate) use self::scan::{attacked_after, pseudo_moves};

/// Summary of the position after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStatus {
    /// The side to move is in check.
    pub is_check: bool,
    /// Set when the side to move has been mated, lost a king or run out of time.
    pub winner: Option<Color>,
    /// The side to move has no legal move and is not in check.
    pub stalemate: bool,
}

impl Board {
    /// Recompute every legal move for the side to move and the game result.
    ///
    /// Idempotent for a given position. The result is also stored on the
    /// board ([`Board::winner`], [`Board::is_stalemate`]).
    pub fn calculate_all_moves(&mut self) -> GameStatus {
        self.clear_moves();

        if let Some(winner) = self.decided_winner() {
            self.set_winner(Some(winner));
            return GameStatus {
                is_check: false,
                winner: Some(winner),
                stalemate: false,
            };
        }

        threats::scan_threats(self);

        let us = self.side_to_move();
        let ours = self.team(us).pieces().to_vec();
        for id in ours {
            let moves = self.legal_destinations(id);
            self.piece_mut(id).set_moves(moves);
        }
        castling::add_castling(self);

        let is_check = self.team(us).is_attacked();
        let count = self.legal_move_count();
        if count == 0 {
            if is_check {
                self.set_winner(Some(us.flip()));
            } else {
                self.set_stalemate(true);
            }
        }
        debug!(
            side = %us,
            moves = count,
            check = is_check,
            winner = ?self.winner(),
            stalemate = self.is_stalemate(),
            "moves calculated"
        );
        GameStatus {
            is_check,
            winner: self.winner(),
            stalemate: self.is_stalemate(),
        }
    }

    /// Reset all per-turn state on pieces and teams, leaving no legal moves.
    pub(crate) fn clear_moves(&mut self) {
        self.set_winner(None);
        self.set_stalemate(false);
        for piece in self.pieces_mut() {
            piece.freshen();
        }
        for color in Color::ALL {
            self.team_mut(color).freshen();
        }
    }

    /// A result that stands without looking at moves: a king blown up, or a
    /// clock run out.
    fn decided_winner(&self) -> Option<Color> {
        for color in Color::ALL {
            if self.team(color).king().is_none() {
                return Some(color.flip());
            }
        }
        if self.clock().is_some() {
            for color in [self.side_to_move(), self.side_to_move().flip()] {
                if self.remaining(color) == 0 {
                    return Some(color.flip());
                }
            }
        }
        None
    }

    /// Destinations of one piece of the side to move after every check, pin
    /// and variant rule has been applied.
    fn legal_destinations(&self, id: PieceId) -> SquareSet {
        let piece = self.piece(id);
        let us = piece.color();
        let team = self.team(us);
        let raw = pseudo_moves(self, id);
        let atomic = self.variant().is_atomic();

        if piece.is_king() {
            let mut denied = team.denied();
            if atomic && let Some(enemy_king) = self.king_square(us.flip()) {
                denied -= enemy_king.neighbors();
            }
            return (raw.quiet | raw.captures) - denied;
        }

        let mask = piece.restricted().unwrap_or(SquareSet::FULL)
            & team.restricted().unwrap_or(SquareSet::FULL);
        let from = piece.square();

        if atomic {
            let mut moves = raw.quiet & mask;
            for to in raw.captures {
                if atomic::capture_is_legal(self, from, to, to) {
                    moves.insert(to);
                }
            }
            if let Some(to) = raw.en_passant
                && let Some(victim) = self.en_passant_victim()
                && atomic::capture_is_legal(self, from, to, victim)
            {
                moves.insert(to);
            }
            return moves;
        }

        let mut moves = (raw.quiet | raw.captures) & mask;
        if let Some(to) = raw.en_passant
            && let Some(victim) = self.en_passant_victim()
        {
            // Vacating both pawns can open a line onto the king, and the
            // capture may remove a checking pawn; only a replay tells.
            let safe = match self.king_square(us) {
                Some(king) => !attacked_after(
                    self,
                    king,
                    us.flip(),
                    SquareSet::from_square(from).with(victim),
                    Some(to),
                ),
                None => true,
            };
            if safe {
                moves.insert(to);
            }
        }
        moves
    }

    /// Square of the pawn an en-passant capture would remove.
    fn en_passant_victim(&self) -> Option<crate::square::Square> {
        self.en_passant_pawn().map(|id| self.piece(id).square())
    }
}
