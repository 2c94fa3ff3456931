//! Integration tests for standard-chess rules through the public API.
//!
//! Positions are set up from notation strings or played from the start with
//! `try_play_move`, the way a game host would drive the board.

use arbiter_core::{Board, Color, MoveKind, PieceKind, Square, STARTING_FEN};

const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const SICILIAN_FEN: &str =
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";

/// Helper: play a list of `(from, to)` moves, panicking on the first refusal.
fn play(board: &mut Board, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        board
            .try_play_move(from, to)
            .unwrap_or_else(|e| panic!("{from}{to} refused: {e}"));
    }
}

/// Everything a notation string should carry, in a comparable form.
fn snapshot(board: &Board) -> Vec<(Square, Color, PieceKind)> {
    let mut pieces: Vec<_> = board
        .pieces()
        .iter()
        .map(|p| (p.square(), p.color(), p.kind()))
        .collect();
    pieces.sort_by_key(|(sq, _, _)| sq.index());
    pieces
}

// ── Move generation ───────────────────────────────────────────────────────────

#[test]
fn twenty_moves_for_each_side_at_the_start() {
    let mut board = Board::starting_position();
    assert_eq!(board.legal_move_count(), 20);
    play(&mut board, &[(Square::E2, Square::E4)]);
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.legal_move_count(), 20);
}

#[test]
fn pinned_bishop_stays_on_the_pin_line() {
    let board: Board = "4k3/8/8/8/3q4/8/1B6/K7 w - - 0 1".parse().unwrap();
    let bishop = board.piece_on(Square::B2).unwrap();
    let moves: Vec<Square> = bishop.moves().collect();
    assert_eq!(moves, vec![Square::C3, Square::D4]);
}

#[test]
fn fools_mate() {
    let mut board = Board::starting_position();
    play(
        &mut board,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
        ],
    );
    let outcome = board.try_play_move(Square::D8, Square::H4).unwrap();
    assert!(outcome.is_check);
    assert_eq!(outcome.winner, Some(Color::Black));
    assert_eq!(board.winner(), Some(Color::Black));
    assert_eq!(board.legal_move_count(), 0);
    assert!(board.is_over());
}

#[test]
fn stalemate_without_check() {
    let mut board: Board = "7k/4Q3/6K1/8/8/8/8/8 w - - 0 1".parse().unwrap();
    let outcome = board.try_play_move(Square::E7, Square::F7).unwrap();
    assert!(outcome.stalemate);
    assert!(!outcome.is_check);
    assert_eq!(outcome.winner, None);
    assert!(board.is_stalemate());
    assert!(board.is_over());
}

#[test]
fn en_passant_lasts_one_ply() {
    let mut board = Board::starting_position();
    play(
        &mut board,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ],
    );
    assert_eq!(board.en_passant_target(), Some(Square::D6));
    assert!(board.piece_on(Square::E5).unwrap().moves().contains(Square::D6));

    play(&mut board, &[(Square::A2, Square::A3), (Square::H7, Square::H6)]);
    assert_eq!(board.en_passant_target(), None);
    assert!(!board.piece_on(Square::E5).unwrap().moves().contains(Square::D6));
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut board: Board = SICILIAN_FEN.parse().unwrap();
    play(
        &mut board,
        &[
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ],
    );
    let outcome = board.try_play_move(Square::E5, Square::D6).unwrap();
    assert_eq!(outcome.kind, MoveKind::Captured);
    assert!(board.piece_on(Square::D5).is_none());
    assert_eq!(board.piece_on(Square::D6).unwrap().kind(), PieceKind::Pawn);
    assert_eq!(board.halfmove_clock(), 0);
}

// ── Castling ──────────────────────────────────────────────────────────────────

#[test]
fn castling_right_lost_after_rook_moves() {
    let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    play(
        &mut board,
        &[
            (Square::H1, Square::H2),
            (Square::A8, Square::A7),
            (Square::H2, Square::H1),
            (Square::A7, Square::A8),
        ],
    );
    assert_eq!(board.castle_rights().to_string(), "Qk");

    let king = board.piece_on(Square::E1).unwrap();
    assert!(!king.moves().contains(Square::H1));
    assert!(king.moves().contains(Square::A1));

    let outcome = board.try_play_move(Square::E1, Square::A1).unwrap();
    assert!(outcome.is_castling);
    let king = board.piece_on(Square::C1).unwrap();
    let rook = board.piece_on(Square::D1).unwrap();
    assert_eq!(king.kind(), PieceKind::King);
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(king.has_moved());
    assert!(rook.has_moved());
    assert_eq!(
        board.to_string(),
        "r3k2r/8/8/8/8/8/8/2KR3R b k - 5 3"
    );
}

#[test]
fn castling_after_the_king_moved_is_gone() {
    let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    play(
        &mut board,
        &[
            (Square::E1, Square::E2),
            (Square::E8, Square::E7),
            (Square::E2, Square::E1),
            (Square::E7, Square::E8),
        ],
    );
    assert_eq!(board.castle_rights().to_string(), "-");
    let king = board.piece_on(Square::E1).unwrap();
    assert!(!king.moves().contains(Square::A1));
    assert!(!king.moves().contains(Square::H1));
}

// ── Notation ──────────────────────────────────────────────────────────────────

#[test]
fn notation_roundtrip_preserves_the_position() {
    for fen in [STARTING_FEN, KIWIPETE_FEN, SICILIAN_FEN] {
        let board: Board = fen.parse().unwrap();
        let again: Board = board.to_string().parse().unwrap();
        assert_eq!(snapshot(&board), snapshot(&again), "pieces differ for {fen}");
        assert_eq!(board.side_to_move(), again.side_to_move());
        assert_eq!(board.castle_rights(), again.castle_rights());
        assert_eq!(board.en_passant_target(), again.en_passant_target());
        assert_eq!(board.halfmove_clock(), again.halfmove_clock());
        assert_eq!(board.fullmove_number(), again.fullmove_number());
        assert_eq!(board.legal_move_count(), again.legal_move_count());
    }
}

#[test]
fn played_game_roundtrips() {
    let mut board = Board::starting_position();
    play(
        &mut board,
        &[
            (Square::E2, Square::E4),
            (Square::C7, Square::C5),
            (Square::G1, Square::F3),
            (Square::D7, Square::D6),
        ],
    );
    let fen = board.to_string();
    assert_eq!(
        fen,
        "rnbqkbnr/pp2pppp/3p4/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 4 3"
    );
    let again: Board = fen.parse().unwrap();
    assert_eq!(again.to_string(), fen);
}

#[test]
fn malformed_notation_is_rejected() {
    assert!("".parse::<Board>().is_err());
    assert!("8/8/8/8/8/8/8/8 w - - 0 1".parse::<Board>().is_err());
    assert!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0".parse::<Board>().is_err());
}
