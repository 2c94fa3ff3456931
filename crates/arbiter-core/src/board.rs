//! The game state: piece arena, teams, turn counters, result and clock.

use std::fmt;

use crate::clock::ClockConfig;
use crate::color::Color;
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::registry::{Registry, Variant};
use crate::square::Square;
use crate::team::Team;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Complete game state.
///
/// The piece arena is the source of truth. The square lookup, both teams and
/// the en-passant pawn are derived from it by [`Board::set_pieces`], the only
/// way the arena is replaced.
#[derive(Clone)]
pub struct Board {
    registry: Registry,
    variant: Variant,
    pieces: Vec<Piece>,
    grid: [Option<PieceId>; Square::COUNT],
    teams: [Team; Color::COUNT],
    side_to_move: Color,
    /// Plies played plus one.
    total_turns: u32,
    halfmove_clock: u32,
    en_passant_pawn: Option<PieceId>,
    winner: Option<Color>,
    stalemate: bool,
    clock: Option<ClockConfig>,
}

impl Board {
    /// The standard starting position under orthodox rules, without a clock.
    pub fn starting_position() -> Board {
        Board::from_config(&GameConfig::default())
    }

    /// The starting position for `config` using the standard registry.
    pub fn from_config(config: &GameConfig) -> Board {
        Board::new_game(Registry::standard(), config)
    }

    /// The starting position for `config` using `registry`.
    pub fn new_game(registry: Registry, config: &GameConfig) -> Board {
        let pieces = Square::all()
            .filter_map(|sq| {
                let kind = match sq.rank() {
                    0 | 7 => BACK_RANK[sq.file() as usize],
                    1 | 6 => PieceKind::Pawn,
                    _ => return None,
                };
                let color = if sq.rank() < 4 {
                    Color::White
                } else {
                    Color::Black
                };
                Some(Piece::new(kind, color, sq))
            })
            .collect();
        let mut board = Board::empty(registry, config.variant);
        board.clock = config.clock;
        if let Some(clock) = config.clock {
            for team in &mut board.teams {
                team.set_remaining(clock.total);
            }
        }
        board.set_pieces(pieces);
        board.calculate_all_moves();
        board
    }

    /// Build a position from an arbitrary piece list.
    ///
    /// The pieces keep their moved flags and en-passant markers as given.
    /// Total turns start at 1 and the legal moves for `side_to_move` are
    /// computed before returning.
    pub fn new(
        registry: Registry,
        variant: Variant,
        pieces: Vec<Piece>,
        side_to_move: Color,
    ) -> Result<Board, BoardError> {
        Board::validate_pieces(&registry, variant, &pieces)?;
        let mut board = Board::empty(registry, variant);
        board.side_to_move = side_to_move;
        board.set_pieces(pieces);
        board.calculate_all_moves();
        Ok(board)
    }

    pub(crate) fn empty(registry: Registry, variant: Variant) -> Board {
        Board {
            registry,
            variant,
            pieces: Vec::new(),
            grid: [None; Square::COUNT],
            teams: [Team::new(Color::White), Team::new(Color::Black)],
            side_to_move: Color::White,
            total_turns: 1,
            halfmove_clock: 0,
            en_passant_pawn: None,
            winner: None,
            stalemate: false,
            clock: None,
        }
    }

    /// Check a piece list before it becomes a board.
    ///
    /// Every kind must be registered, squares must be distinct and each side
    /// needs exactly one king. The explosive variant accepts one missing king,
    /// which is how a finished game looks.
    pub(crate) fn validate_pieces(
        registry: &Registry,
        variant: Variant,
        pieces: &[Piece],
    ) -> Result<(), BoardError> {
        let mut seen = crate::square_set::SquareSet::EMPTY;
        let mut kings = [0usize; Color::COUNT];
        for piece in pieces {
            if !registry.has_piece(piece.kind()) {
                return Err(BoardError::UnregisteredPiece {
                    letter: piece.letter(),
                });
            }
            if seen.contains(piece.square()) {
                return Err(BoardError::OverlappingPieces {
                    square: piece.square(),
                });
            }
            seen.insert(piece.square());
            if piece.is_king() {
                kings[piece.color().index()] += 1;
            }
        }
        let missing = kings.iter().filter(|&&n| n == 0).count();
        for color in Color::ALL {
            let count = kings[color.index()];
            let allowed = count == 1 || (count == 0 && variant.is_atomic() && missing == 1);
            if !allowed {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }
        Ok(())
    }

    /// Replace the piece arena and rebuild everything derived from it.
    ///
    /// Handles into the previous arena are invalid afterwards.
    pub(crate) fn set_pieces(&mut self, pieces: Vec<Piece>) {
        self.pieces = pieces;
        self.grid = [None; Square::COUNT];
        self.en_passant_pawn = None;
        for team in &mut self.teams {
            team.empty();
        }
        for (index, piece) in self.pieces.iter().enumerate() {
            let id = PieceId(index);
            debug_assert!(
                self.grid[piece.square().index()].is_none(),
                "two pieces on {}",
                piece.square()
            );
            self.grid[piece.square().index()] = Some(id);
            self.teams[piece.color().index()].add(id, piece);
            if piece.en_passant().is_some() {
                self.en_passant_pawn = Some(id);
            }
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// All pieces on the board, in arena order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The piece behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is from an older arena and out of range.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Move the arena out, leaving the board empty until [`Board::set_pieces`].
    pub(crate) fn take_pieces(&mut self) -> Vec<Piece> {
        std::mem::take(&mut self.pieces)
    }

    /// Handle of the piece standing on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq.index()]
    }

    /// The piece standing on `sq`, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<&Piece> {
        self.piece_at(sq).map(|id| self.piece(id))
    }

    #[inline]
    pub fn team(&self, color: Color) -> &Team {
        &self.teams[color.index()]
    }

    pub(crate) fn team_mut(&mut self, color: Color) -> &mut Team {
        &mut self.teams[color.index()]
    }

    /// Square of `color`'s king, or `None` once it has been blown up.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.team(color).king().map(|id| self.piece(id).square())
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Plies played plus one; 1 at the start of a game.
    #[inline]
    pub fn total_turns(&self) -> u32 {
        self.total_turns
    }

    pub(crate) fn set_total_turns(&mut self, total: u32) {
        self.total_turns = total;
    }

    /// Full-move number: starts at 1 and advances after Black moves.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.total_turns.div_ceil(2)
    }

    /// Plies since the last capture or promotion.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    /// The pawn that can be captured en passant this turn.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<PieceId> {
        self.en_passant_pawn
    }

    /// The square an en-passant capture lands on this turn.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_pawn
            .and_then(|id| self.piece(id).en_passant())
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub(crate) fn set_winner(&mut self, winner: Option<Color>) {
        self.winner = winner;
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    pub(crate) fn set_stalemate(&mut self, stalemate: bool) {
        self.stalemate = stalemate;
    }

    /// Return `true` if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.team(self.side_to_move).is_attacked()
    }

    /// Return `true` once the game has a winner or is drawn by stalemate.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.stalemate
    }

    #[inline]
    pub fn clock(&self) -> Option<ClockConfig> {
        self.clock
    }

    pub(crate) fn set_clock(&mut self, clock: Option<ClockConfig>) {
        self.clock = clock;
    }

    /// Remaining clock seconds for `color`.
    #[inline]
    pub fn remaining(&self, color: Color) -> u32 {
        self.team(color).remaining()
    }

    pub(crate) fn set_remaining(&mut self, color: Color, seconds: u32) {
        self.team_mut(color).set_remaining(seconds);
    }

    /// Legal moves of the side to move as `(piece, destination)` pairs.
    ///
    /// Castling appears as the king moving onto its rook's square.
    pub fn legal_moves(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.team(self.side_to_move)
            .pieces()
            .iter()
            .flat_map(move |&id| self.piece(id).moves().map(move |to| (id, to)))
    }

    /// Number of legal moves for the side to move.
    pub fn legal_move_count(&self) -> usize {
        self.team(self.side_to_move)
            .pieces()
            .iter()
            .map(|&id| self.piece(id).moves().count() as usize)
            .sum()
    }

    /// A pawn standing on its last rank, waiting for [`Board::promote`](crate::Board::promote).
    pub fn pending_promotion(&self) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.is_pawn() && p.square().rank() == p.color().promotion_rank())
            .map(PieceId)
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| board.piece_on(sq))
                    .map_or('.', Piece::letter);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
