//! Move application and promotion.

use tracing::{debug, trace};

use crate::atomic;
use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::error::MoveError;
use crate::movegen::GameStatus;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::{PieceKind, Promotion};
use crate::square::Square;

/// Whether a move took something off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Moved,
    Captured,
}

/// What happened when a move or promotion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    /// The side now to move is in check.
    pub is_check: bool,
    /// The move was a castle.
    pub is_castling: bool,
    pub winner: Option<Color>,
    pub stalemate: bool,
    /// A pawn reached its last rank and must be promoted with [`Board::promote`].
    pub should_promote: bool,
    /// A capture blew up a king and decided the game.
    pub blast_win: bool,
    /// The kind a pawn was promoted to.
    pub promoted: Option<PieceKind>,
}

impl MoveOutcome {
    fn from_status(kind: MoveKind, status: GameStatus) -> MoveOutcome {
        MoveOutcome {
            kind,
            is_check: status.is_check,
            is_castling: false,
            winner: status.winner,
            stalemate: status.stalemate,
            should_promote: false,
            blast_win: false,
            promoted: None,
        }
    }
}

impl Board {
    /// Apply a move and compute the legal moves for the next side.
    ///
    /// `to` must be one of the piece's current legal moves and the piece
    /// must belong to the side to move; this is checked in debug builds only.
    /// Use [`Board::try_play_move`] for untrusted input.
    ///
    /// Castling is requested by moving the king onto its own rook's square.
    /// The king lands on the g- or c-file and the rook next to it.
    pub fn play_move(&mut self, id: PieceId, to: Square) -> MoveOutcome {
        let piece = self.piece(id);
        debug_assert!(
            piece.color() == self.side_to_move(),
            "{piece:?} moved out of turn"
        );
        debug_assert!(
            piece.moves().contains(to),
            "{piece:?} has no legal move to {to}"
        );
        let mover = piece.color();
        let from = piece.square();
        let is_pawn = piece.is_pawn();
        let is_castling = piece.is_king()
            && self
                .piece_on(to)
                .is_some_and(|p| p.color() == mover && p.kind() == PieceKind::Rook);
        let stale = self.en_passant_pawn();

        let mut removed: Vec<PieceId> = Vec::new();
        if is_pawn
            && let Some(ep) = stale
            && self.piece(ep).color() != mover
            && self.piece(ep).en_passant() == Some(to)
        {
            removed.push(ep);
        }

        if is_castling {
            self.castle(id, to);
        } else {
            if let Some(victim) = self.piece_at(to) {
                removed.push(victim);
            }
            self.piece_mut(id).relocate(to);
        }
        if let Some(ep) = stale {
            self.piece_mut(ep).set_en_passant(None);
        }

        let captured = !removed.is_empty();
        let mut winner = None;
        let mut blasted = false;
        if captured && self.variant().is_atomic() {
            // The grid still shows the position before the move; only the
            // capturer has left its square and it is destroyed anyway.
            let victims = atomic::blast_victims(self, id, to);
            for &victim in victims.iter().chain(&removed) {
                let destroyed = self.piece(victim);
                if destroyed.is_king() {
                    winner = Some(destroyed.color().flip());
                }
            }
            debug!(center = %to, destroyed = victims.len() + removed.len(), "blast");
            blasted = true;
            removed.extend(victims);
        }

        let mut index = 0;
        let mut pieces = self.take_pieces();
        pieces.retain(|_| {
            let keep = !removed.contains(&PieceId(index));
            index += 1;
            keep
        });
        self.set_pieces(pieces);

        self.set_total_turns(self.total_turns().saturating_add(1));
        self.set_side_to_move(mover.flip());
        if captured {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }
        if let Some(clock) = self.clock() {
            let credited = self.remaining(mover).saturating_add(clock.increment);
            self.set_remaining(mover, credited);
        }

        let blast_win = winner.is_some();
        let should_promote = is_pawn && !blasted && to.rank() == mover.promotion_rank();
        let status = if blast_win {
            self.clear_moves();
            self.set_winner(winner);
            GameStatus {
                is_check: false,
                winner,
                stalemate: false,
            }
        } else {
            let mut status = self.calculate_all_moves();
            if should_promote {
                // No result stands while the pawn is still a pawn.
                self.set_winner(None);
                self.set_stalemate(false);
                status.winner = None;
                status.stalemate = false;
            }
            status
        };

        trace!(%from, %to, captured, is_castling, should_promote, "move played");

        let kind = if captured {
            MoveKind::Captured
        } else {
            MoveKind::Moved
        };
        MoveOutcome {
            is_castling,
            should_promote,
            blast_win,
            ..MoveOutcome::from_status(kind, status)
        }
    }

    /// Relocate the king and the rook standing on `rook_square` to their
    /// castled squares.
    fn castle(&mut self, king: PieceId, rook_square: Square) {
        let king_square = self.piece(king).square();
        let side = CastleSide::toward(king_square.file(), rook_square.file());
        let rank = king_square.rank();
        debug_assert!(
            self.piece_at(rook_square).is_some(),
            "no rook to castle with on {rook_square}"
        );
        let Some(rook) = self.piece_at(rook_square) else {
            return;
        };
        if let (Some(king_to), Some(rook_to)) = (
            Square::new(side.king_target_file(), rank),
            Square::new(side.rook_target_file(), rank),
        ) {
            self.piece_mut(king).relocate(king_to);
            self.piece_mut(rook).relocate(rook_to);
            // Either piece may already stand on its target.
            self.piece_mut(king).set_moved(true);
            self.piece_mut(rook).set_moved(true);
            debug!(color = %self.piece(king).color(), ?side, "castled");
        }
    }

    /// Validate and apply a move given by its source and destination squares.
    ///
    /// On error the board is unchanged.
    pub fn try_play_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if let Some(pawn) = self.pending_promotion() {
            return Err(MoveError::PromotionPending {
                square: self.piece(pawn).square(),
            });
        }
        let id = self
            .piece_at(from)
            .ok_or(MoveError::EmptySquare { square: from })?;
        let piece = self.piece(id);
        if piece.color() != self.side_to_move() {
            return Err(MoveError::WrongSide { square: from });
        }
        if !piece.moves().contains(to) {
            return Err(MoveError::IllegalMove { from, to });
        }
        Ok(self.play_move(id, to))
    }

    /// Replace a pawn on its last rank with a piece of the chosen kind and
    /// recompute the legal moves.
    ///
    /// The new piece counts as moved. Resets the half-move clock.
    pub fn promote(&mut self, pawn: PieceId, choice: Promotion) -> MoveOutcome {
        let old = self.piece(pawn);
        debug_assert!(
            old.is_pawn() && old.square().rank() == old.color().promotion_rank(),
            "{old:?} cannot promote"
        );
        let replacement = Piece::new(choice.kind(), old.color(), old.square()).with_moved(true);
        debug!(square = %old.square(), kind = %choice.kind(), "promotion");

        let mut pieces = self.take_pieces();
        pieces[pawn.index()] = replacement;
        self.set_pieces(pieces);
        self.set_halfmove_clock(0);

        let status = self.calculate_all_moves();
        MoveOutcome {
            promoted: Some(choice.kind()),
            ..MoveOutcome::from_status(MoveKind::Moved, status)
        }
    }

    /// Validate and apply a promotion of the pawn on `square`.
    pub fn try_promote(&mut self, square: Square, choice: Promotion) -> Result<MoveOutcome, MoveError> {
        let id = self
            .piece_at(square)
            .filter(|&id| Some(id) == self.pending_promotion())
            .ok_or(MoveError::CannotPromote { square })?;
        Ok(self.promote(id, choice))
    }
}
