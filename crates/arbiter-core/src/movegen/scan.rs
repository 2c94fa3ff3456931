//! Tracing template directions across the board.

use crate::board::Board;
use crate::color::Color;
use crate::piece::{PieceId, Step};
use crate::square::Square;
use crate::square_set::SquareSet;

/// The squares one template direction passes over, nearest first, ignoring
/// occupancy.
#[derive(Debug, Clone)]
pub(crate) struct Ray {
    next: Option<Square>,
    dx: i8,
    dy: i8,
    left: u8,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.left == 0 {
            return None;
        }
        let sq = self.next?;
        self.left -= 1;
        self.next = sq.offset(self.dx, self.dy);
        Some(sq)
    }
}

/// Walk `step` outward from `origin`. A limit of 0 slides to the edge.
pub(crate) fn ray(origin: Square, step: Step) -> Ray {
    Ray {
        next: origin.offset(step.dx, step.dy),
        dx: step.dx,
        dy: step.dy,
        left: if step.limit == 0 { 7 } else { step.limit },
    }
}

/// Raw destinations of one piece, before any check or pin filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Destinations {
    /// Empty squares the piece can move to.
    pub quiet: SquareSet,
    /// Squares holding an enemy piece the piece can capture.
    pub captures: SquareSet,
    /// Landing square of an en-passant capture, if one is available.
    pub en_passant: Option<Square>,
}

/// Where the piece `id` could go if its own king did not matter.
///
/// A friendly blocker stops a ray with no move; an enemy blocker yields one
/// capture and stops it. A pawn's capturing diagonal treats the marker of an
/// enemy pawn that just double-stepped as occupied.
pub(crate) fn pseudo_moves(board: &Board, id: PieceId) -> Destinations {
    let piece = board.piece(id);
    let color = piece.color();
    let marker = enemy_marker(board, color).filter(|_| piece.is_pawn());
    let template = board.registry().template(piece, board.variant());

    let mut dest = Destinations::default();
    for step in template.as_slice() {
        for sq in ray(piece.square(), *step) {
            match board.piece_on(sq) {
                None if step.can_move => dest.quiet.insert(sq),
                None => {
                    if step.can_attack && Some(sq) == marker {
                        dest.en_passant = Some(sq);
                    }
                }
                Some(other) => {
                    if step.can_attack && other.color() != color {
                        dest.captures.insert(sq);
                    }
                    break;
                }
            }
        }
    }
    dest
}

/// En-passant marker of the opposing pawn that just double-stepped.
fn enemy_marker(board: &Board, color: Color) -> Option<Square> {
    let pawn = board.piece(board.en_passant_pawn()?);
    if pawn.color() == color {
        return None;
    }
    pawn.en_passant()
}

/// Count the empty squares walking horizontally from `origin` by `dx` until
/// the first occupied square or the edge.
pub(crate) fn empty_run(board: &Board, origin: Square, dx: i8) -> u8 {
    let mut count = 0;
    let mut next = origin.offset(dx, 0);
    while let Some(sq) = next {
        if board.piece_at(sq).is_some() {
            break;
        }
        count += 1;
        next = sq.offset(dx, 0);
    }
    count
}

/// Return `true` if `target` would be attacked by `by` once the pieces on
/// `vacated` are gone and `filled` holds a piece.
///
/// Pieces of `by` standing on `vacated` or `filled` count as captured and
/// attack nothing.
pub(crate) fn attacked_after(
    board: &Board,
    target: Square,
    by: Color,
    vacated: SquareSet,
    filled: Option<Square>,
) -> bool {
    let occupied =
        |sq: Square| Some(sq) == filled || (board.piece_at(sq).is_some() && !vacated.contains(sq));

    board.team(by).pieces().iter().any(|&id| {
        let piece = board.piece(id);
        let origin = piece.square();
        if vacated.contains(origin) || Some(origin) == filled {
            return false;
        }
        let template = board.registry().template(piece, board.variant());
        template
            .as_slice()
            .iter()
            .filter(|step| step.can_attack)
            .any(|step| {
                for sq in ray(origin, *step) {
                    if sq == target {
                        return true;
                    }
                    if occupied(sq) {
                        break;
                    }
                }
                false
            })
    })
}

#[cfg(test)]
mod tests {
    use super::{attacked_after, empty_run, pseudo_moves, ray};
    use crate::board::Board;
    use crate::color::Color;
    use crate::piece::Step;
    use crate::square::Square;
    use crate::square_set::SquareSet;

    #[test]
    fn ray_respects_limit_and_edge() {
        let squares: Vec<_> = ray(Square::A1, Step::new(1, 1, 0)).collect();
        assert_eq!(squares.len(), 7);
        assert_eq!(squares.last(), Some(&Square::H8));

        let squares: Vec<_> = ray(Square::E2, Step::new(0, 1, 2)).collect();
        assert_eq!(squares, vec![Square::E3, Square::E4]);

        assert_eq!(ray(Square::H4, Step::new(1, 0, 0)).count(), 0);
        assert_eq!(ray(Square::G1, Step::new(2, 1, 1)).count(), 0);
    }

    #[test]
    fn blockers_stop_rays() {
        let board: Board = "4k3/8/8/8/8/8/8/R2nK3 w - - 0 1".parse().unwrap();
        let rook = board.piece_at(Square::A1).unwrap();
        let dest = pseudo_moves(&board, rook);
        assert!(dest.captures.contains(Square::D1));
        assert!(dest.quiet.contains(Square::C1));
        assert!(!dest.quiet.contains(Square::E1));
        assert!(dest.quiet.contains(Square::A8));
        assert_eq!(dest.quiet.count(), 9);
    }

    #[test]
    fn pawn_double_step_is_blocked_by_a_near_piece() {
        let board: Board = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1".parse().unwrap();
        let pawn = board.piece_at(Square::E2).unwrap();
        let dest = pseudo_moves(&board, pawn);
        assert!(dest.quiet.is_empty());
        assert!(dest.captures.is_empty());
    }

    #[test]
    fn en_passant_marker_counts_as_occupied() {
        let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let pawn = board.piece_at(Square::E5).unwrap();
        let dest = pseudo_moves(&board, pawn);
        assert_eq!(dest.en_passant, Some(Square::D6));
        assert!(dest.quiet.contains(Square::E6));
    }

    #[test]
    fn empty_run_counts_until_blocked() {
        let board = Board::starting_position();
        assert_eq!(empty_run(&board, Square::A1, 1), 0);
        let board: Board = "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().unwrap();
        assert_eq!(empty_run(&board, Square::A1, 1), 3);
        assert_eq!(empty_run(&board, Square::H1, -1), 2);
    }

    #[test]
    fn attacked_after_sees_through_vacated_squares() {
        let board: Board = "4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1".parse().unwrap();
        assert!(!attacked_after(&board, Square::A5, Color::Black, SquareSet::EMPTY, None));
        let vacated = SquareSet::from_square(Square::B5).with(Square::C5);
        assert!(attacked_after(&board, Square::A5, Color::Black, vacated, Some(Square::C6)));
        let blocked = SquareSet::from_square(Square::B5);
        assert!(!attacked_after(&board, Square::A5, Color::Black, blocked, Some(Square::C6)));
    }
}
