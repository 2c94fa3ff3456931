//! Per-side view over the board's pieces plus cross-piece state.

use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::square_set::SquareSet;

/// One side's pieces and the aggregate state shared between them.
///
/// The board owns the pieces; a team only holds handles into that arena and
/// is rebuilt whenever the piece list is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    color: Color,
    pieces: Vec<PieceId>,
    king: Option<PieceId>,
    /// Rooks on the queen-side and king-side corners of the home rank.
    rooks: [Option<PieceId>; 2],
    /// Squares every non-king piece is limited to while the king is in check.
    restricted: Option<SquareSet>,
    attacked: bool,
    /// Squares the king may not step onto this turn.
    denied: SquareSet,
    /// Remaining clock time in seconds.
    remaining: u32,
}

impl Team {
    pub fn new(color: Color) -> Team {
        Team {
            color,
            pieces: Vec::new(),
            king: None,
            rooks: [None; 2],
            restricted: None,
            attacked: false,
            denied: SquareSet::EMPTY,
            remaining: 0,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Handles of this side's pieces.
    #[inline]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    /// Handle of this side's king.
    #[inline]
    pub fn king(&self) -> Option<PieceId> {
        self.king
    }

    /// Handle of the rook standing on the given corner of the home rank.
    #[inline]
    pub fn rook(&self, side: CastleSide) -> Option<PieceId> {
        self.rooks[side.index()]
    }

    #[inline]
    pub fn restricted(&self) -> Option<SquareSet> {
        self.restricted
    }

    /// Return `true` if the king was found under attack by the last generation pass.
    #[inline]
    pub fn is_attacked(&self) -> bool {
        self.attacked
    }

    #[inline]
    pub fn denied(&self) -> SquareSet {
        self.denied
    }

    /// Remaining clock time in seconds.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub(crate) fn set_remaining(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    /// Drop all piece handles, keeping the clock.
    pub(crate) fn empty(&mut self) {
        self.pieces.clear();
        self.king = None;
        self.rooks = [None; 2];
    }

    /// Register a piece of this side.
    pub(crate) fn add(&mut self, id: PieceId, piece: &Piece) {
        self.pieces.push(id);
        match piece.kind() {
            PieceKind::King => self.king = Some(id),
            PieceKind::Rook if piece.square().rank() == self.color.home_rank() => {
                match piece.square().file() {
                    0 => self.rooks[CastleSide::QueenSide.index()] = Some(id),
                    7 => self.rooks[CastleSide::KingSide.index()] = Some(id),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Clear the per-turn check state.
    pub(crate) fn freshen(&mut self) {
        self.restricted = None;
        self.attacked = false;
        self.denied = SquareSet::EMPTY;
    }

    pub(crate) fn deny(&mut self, squares: SquareSet) {
        self.denied |= squares;
    }

    /// Record a check delivered along `line`. A second check in the same pass
    /// leaves nothing but king moves.
    pub(crate) fn record_check(&mut self, line: SquareSet) {
        if self.attacked {
            self.restricted = Some(SquareSet::EMPTY);
        } else {
            self.attacked = true;
            self.restricted = Some(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Team;
    use crate::castle_rights::CastleSide;
    use crate::color::Color;
    use crate::piece::{Piece, PieceId};
    use crate::piece_kind::PieceKind;
    use crate::square::Square;
    use crate::square_set::SquareSet;

    #[test]
    fn add_tracks_king_and_corner_rooks() {
        let mut team = Team::new(Color::Black);
        team.add(PieceId(0), &Piece::new(PieceKind::King, Color::Black, Square::E8));
        team.add(PieceId(1), &Piece::new(PieceKind::Rook, Color::Black, Square::A8));
        team.add(PieceId(2), &Piece::new(PieceKind::Rook, Color::Black, Square::H8));
        team.add(PieceId(3), &Piece::new(PieceKind::Rook, Color::Black, Square::D8));
        assert_eq!(team.king(), Some(PieceId(0)));
        assert_eq!(team.rook(CastleSide::QueenSide), Some(PieceId(1)));
        assert_eq!(team.rook(CastleSide::KingSide), Some(PieceId(2)));
        assert_eq!(team.pieces().len(), 4);
    }

    #[test]
    fn rooks_off_the_home_rank_are_ignored() {
        let mut team = Team::new(Color::White);
        team.add(PieceId(0), &Piece::new(PieceKind::Rook, Color::White, Square::A8));
        assert_eq!(team.rook(CastleSide::QueenSide), None);
    }

    #[test]
    fn second_check_empties_the_mask() {
        let mut team = Team::new(Color::White);
        let line = SquareSet::from_square(Square::E2).with(Square::E3);
        team.record_check(line);
        assert!(team.is_attacked());
        assert_eq!(team.restricted(), Some(line));
        team.record_check(SquareSet::from_square(Square::F3));
        assert_eq!(team.restricted(), Some(SquareSet::EMPTY));
        team.freshen();
        assert!(!team.is_attacked());
        assert_eq!(team.restricted(), None);
    }

    #[test]
    fn empty_keeps_the_clock() {
        let mut team = Team::new(Color::White);
        team.set_remaining(90);
        team.add(PieceId(0), &Piece::new(PieceKind::King, Color::White, Square::E1));
        team.empty();
        assert!(team.pieces().is_empty());
        assert_eq!(team.king(), None);
        assert_eq!(team.remaining(), 90);
    }
}
