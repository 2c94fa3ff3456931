//! Castling availability.

use tracing::trace;

use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::square::Square;
use crate::square_set::SquareSet;

use super::scan::empty_run;

/// Offer the square of each castling rook as a king destination.
///
/// Runs after the legal pass so the rooks' moves and the denied squares of
/// this turn are known.
pub(super) fn add_castling(board: &mut Board) {
    let us = board.side_to_move();
    let team = board.team(us);
    let Some(king_id) = team.king() else {
        return;
    };
    let king = board.piece(king_id);
    if king.has_moved() || team.is_attacked() {
        return;
    }
    let king_sq = king.square();

    let mut offered = SquareSet::EMPTY;
    for side in CastleSide::ALL {
        let Some(rook_id) = team.rook(side) else {
            continue;
        };
        let rook = board.piece(rook_id);
        let rook_sq = rook.square();
        if rook.has_moved() || rook.moves().is_empty() || rook_sq.rank() != king_sq.rank() {
            continue;
        }

        let toward_king: i8 = if rook_sq.file() < king_sq.file() { 1 } else { -1 };
        let distance = king_sq.file().abs_diff(rook_sq.file());
        let between: SquareSet = (1..distance)
            .filter_map(|i| rook_sq.offset(toward_king * i as i8, 0))
            .collect();
        if !(between & team.denied()).is_empty() {
            continue;
        }
        if empty_run(board, rook_sq, toward_king) != distance - 1 {
            continue;
        }
        // The landing squares may hold only the castling pair itself, and the
        // king may not land on an attacked square.
        let rank = king_sq.rank();
        let (Some(king_to), Some(rook_to)) = (
            Square::new(side.king_target_file(), rank),
            Square::new(side.rook_target_file(), rank),
        ) else {
            continue;
        };
        let clear = |sq: Square| {
            board
                .piece_at(sq)
                .is_none_or(|id| id == king_id || id == rook_id)
        };
        if !clear(king_to) || !clear(rook_to) || team.denied().contains(king_to) {
            continue;
        }
        trace!(color = %us, ?side, "castling available");
        offered.insert(rook_sq);
    }

    if !offered.is_empty() {
        board.piece_mut(king_id).add_moves(offered);
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::square::Square;

    fn king_moves(fen: &str, sq: Square) -> crate::square_set::SquareSet {
        let board: Board = fen.parse().unwrap();
        board.piece_on(sq).unwrap().moves()
    }

    #[test]
    fn both_sides_offered() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Square::E1);
        assert!(moves.contains(Square::H1));
        assert!(moves.contains(Square::A1));
    }

    #[test]
    fn blocked_path() {
        let moves = king_moves("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1", Square::E1);
        assert!(!moves.contains(Square::H1));
        assert!(!moves.contains(Square::A1));
    }

    #[test]
    fn not_through_attacked_squares() {
        // Bishop on a6 covers f1.
        let moves = king_moves("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1", Square::E1);
        assert!(!moves.contains(Square::H1));
        assert!(moves.contains(Square::A1));
    }

    #[test]
    fn not_out_of_check() {
        let moves = king_moves("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1", Square::E1);
        assert!(!moves.contains(Square::A1));
        assert!(!moves.contains(Square::H1));
        assert!(moves.contains(Square::E2));
    }

    #[test]
    fn black_castles_on_its_own_rank() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1", Square::E8);
        assert!(moves.contains(Square::A8));
        assert!(moves.contains(Square::H8));
    }

    #[test]
    fn rook_next_to_the_king() {
        let moves = king_moves("4k3/8/8/8/8/8/8/6KR w K - 0 1", Square::G1);
        assert!(moves.contains(Square::H1));
        // The king would land on c1, which the rook on c8 covers.
        let moves = king_moves("2r1k3/8/8/8/8/8/8/RK6 w Q - 0 1", Square::B1);
        assert!(!moves.contains(Square::A1));
    }

    #[test]
    fn requires_the_right() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w Kkq - 0 1", Square::E1);
        assert!(moves.contains(Square::H1));
        assert!(!moves.contains(Square::A1));
    }
}
