//! Threat pass: what the side not to move attacks, checks and pins.

use crate::board::Board;
use crate::piece::{PieceId, Step};
use crate::square::Square;
use crate::square_set::SquareSet;

use super::scan::ray;

/// Trace every direction of every opposing piece and record, for the side to
/// move, the denied squares, any check, and every pinned piece.
pub(super) fn scan_threats(board: &mut Board) {
    let us = board.side_to_move();
    let them = us.flip();
    let Some(king) = board.team(us).king() else {
        return;
    };
    let king_sq = board.piece(king).square();

    // Adjacent kings cannot be attacked in the explosive variant: capturing
    // one would blow up the other.
    let kings_touch = board.variant().is_atomic()
        && board
            .king_square(them)
            .is_some_and(|sq| sq.is_adjacent(king_sq));
    if kings_touch {
        let ours = board.team(us).pieces().to_vec();
        for id in ours {
            board.piece_mut(id).set_pin_immune(true);
        }
    }

    let attackers = board.team(them).pieces().to_vec();
    for id in attackers {
        let piece = board.piece(id);
        let origin = piece.square();
        let template = board.registry().template(piece, board.variant());
        for step in template.as_slice() {
            trace(board, origin, *step, king, kings_touch);
        }
    }
}

/// Follow one direction of the attacker on `origin`.
fn trace(board: &mut Board, origin: Square, step: Step, king: PieceId, kings_touch: bool) {
    let us = board.side_to_move();
    let mut line = SquareSet::EMPTY;
    let mut squares = ray(origin, step);

    while let Some(sq) = squares.next() {
        let Some(hit) = board.piece_at(sq) else {
            if step.can_attack {
                board.team_mut(us).deny(SquareSet::from_square(sq));
            }
            line.insert(sq);
            continue;
        };
        if !step.can_attack {
            return;
        }
        if board.piece(hit).color() != us {
            // Defended: the king may not capture here.
            board.team_mut(us).deny(SquareSet::from_square(sq));
            return;
        }

        let attack = line.with(origin);
        if hit == king {
            if !kings_touch {
                board.team_mut(us).record_check(attack);
            }
            if let Some(beyond) = squares.next() {
                board.team_mut(us).deny(SquareSet::from_square(beyond));
            }
            return;
        }
        if board.piece(hit).is_pin_immune() {
            return;
        }

        let mut behind = SquareSet::EMPTY;
        for next in squares {
            match board.piece_at(next) {
                None => behind.insert(next),
                Some(id) => {
                    if id == king {
                        board.piece_mut(hit).restrict(attack | behind);
                    }
                    return;
                }
            }
        }
        return;
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::color::Color;
    use crate::square::Square;
    use crate::square_set::SquareSet;

    #[test]
    fn pin_restricts_to_the_line() {
        let board: Board = "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1".parse().unwrap();
        let bishop = board.piece_on(Square::E2).unwrap();
        let line: SquareSet = [
            Square::E3,
            Square::E4,
            Square::E5,
            Square::E6,
            Square::E7,
        ]
        .into_iter()
        .collect();
        assert_eq!(bishop.restricted(), Some(line));
        assert!(bishop.moves().is_empty());
    }

    #[test]
    fn check_records_ray_and_attacker() {
        let board: Board = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1".parse().unwrap();
        let team = board.team(Color::White);
        assert!(team.is_attacked());
        let expected: SquareSet = [Square::A1, Square::B1, Square::C1, Square::D1]
            .into_iter()
            .collect();
        assert_eq!(team.restricted(), Some(expected));
        // Stepping back along the ray stays in check.
        assert!(team.denied().contains(Square::F1));
    }

    #[test]
    fn defended_pieces_are_denied() {
        let board: Board = "4k3/8/8/8/8/5p2/4p3/4K3 w - - 0 1".parse().unwrap();
        let king = board.piece_on(Square::E1).unwrap();
        assert!(board.team(Color::White).denied().contains(Square::E2));
        assert!(!king.moves().contains(Square::E2));
        assert!(king.moves().contains(Square::D2));
    }

    #[test]
    fn second_blocker_breaks_the_pin() {
        let board: Board = "4k3/4r3/8/8/4N3/8/4B3/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(board.piece_on(Square::E2).unwrap().restricted(), None);
        assert_eq!(board.piece_on(Square::E4).unwrap().restricted(), None);
    }
}
