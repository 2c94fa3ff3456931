//! Explosive-capture rules.
//!
//! Every capture destroys the capturer, the captured piece and every
//! non-pawn piece on the eight squares around the destination. Destroying a
//! king wins the game on the spot.

use crate::board::Board;
use crate::movegen::attacked_after;
use crate::piece::PieceId;
use crate::square::Square;
use crate::square_set::SquareSet;

/// Squares of the non-pawn pieces surrounding `center`.
pub(crate) fn blast_zone(board: &Board, center: Square) -> SquareSet {
    center
        .neighbors()
        .filter(|&sq| board.piece_on(sq).is_some_and(|p| !p.is_pawn()))
        .collect()
}

/// Pieces a capture on `center` by `capturer` destroys besides the captured
/// piece, read from the board as it stood before the capture.
pub(crate) fn blast_victims(board: &Board, capturer: PieceId, center: Square) -> Vec<PieceId> {
    let mut victims = vec![capturer];
    victims.extend(
        blast_zone(board, center)
            .filter_map(|sq| board.piece_at(sq))
            .filter(|&id| id != capturer),
    );
    victims
}

/// Decide whether the piece on `from` may capture by landing on `to`,
/// removing the piece on `victim`.
///
/// A capture that destroys the mover's king is never legal. One that destroys
/// the enemy king always is, pins and checks notwithstanding. Otherwise the
/// mover's king must not be attacked once the smoke clears, and touching
/// kings are always safe.
pub(crate) fn capture_is_legal(board: &Board, from: Square, to: Square, victim: Square) -> bool {
    let Some(piece) = board.piece_on(from) else {
        return false;
    };
    let us = piece.color();
    let them = us.flip();
    let destroyed = blast_zone(board, to).with(from).with(victim);

    let Some(king) = board.king_square(us) else {
        return false;
    };
    if destroyed.contains(king) {
        return false;
    }
    let Some(enemy_king) = board.king_square(them) else {
        return true;
    };
    if destroyed.contains(enemy_king) || king.is_adjacent(enemy_king) {
        return true;
    }
    !attacked_after(board, king, them, destroyed.with(to), None)
}
