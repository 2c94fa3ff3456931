//! Perft (performance test) for move generation correctness verification.

use crate::board::Board;
use crate::piece::PieceId;
use crate::piece_kind::Promotion;
use crate::square::Square;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 counts legal moves
/// directly, with each promoting pawn move worth one leaf per promotion
/// choice.
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 || board.is_over() {
        return if depth == 0 { 1 } else { 0 };
    }

    let moves: Vec<(PieceId, Square)> = board.legal_moves().collect();

    if depth == 1 {
        return moves
            .iter()
            .map(|&(id, to)| if promotes(board, id, to) { 4 } else { 1 })
            .sum();
    }

    moves
        .iter()
        .map(|&(id, to)| subtree(board, id, to, depth))
        .sum()
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs with moves written as `e2e4`, sorted
/// alphabetically. Promotion choices are summed under their pawn move.
pub fn divide(board: &Board, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = board
        .legal_moves()
        .collect::<Vec<_>>()
        .into_iter()
        .map(|(id, to)| {
            let from = board.piece(id).square();
            let count = if depth <= 1 {
                if promotes(board, id, to) { 4 } else { 1 }
            } else {
                subtree(board, id, to, depth)
            };
            (format!("{from}{to}"), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Leaves below the move `id -> to`, branching over promotion choices.
fn subtree(board: &Board, id: PieceId, to: Square, depth: usize) -> u64 {
    let mut child = board.clone();
    let outcome = child.play_move(id, to);
    if !outcome.should_promote {
        return perft(&child, depth - 1);
    }
    let Some(pawn) = child.pending_promotion() else {
        return perft(&child, depth - 1);
    };
    Promotion::ALL
        .iter()
        .map(|&choice| {
            let mut promoted = child.clone();
            promoted.promote(pawn, choice);
            perft(&promoted, depth - 1)
        })
        .sum()
}

/// Whether playing `id -> to` leaves a pawn waiting for promotion.
fn promotes(board: &Board, id: PieceId, to: Square) -> bool {
    let piece = board.piece(id);
    if !piece.is_pawn() || to.rank() != piece.color().promotion_rank() {
        return false;
    }
    // An explosive capture destroys the capturing pawn.
    !(board.variant().is_atomic() && board.piece_at(to).is_some())
}
