//! Pieces on the board and their movement templates.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::square_set::SquareSet;

/// Handle to a piece in the board's arena.
///
/// Handles are positions in [`Board::pieces`](crate::Board::pieces) and are only
/// valid until the next move, promotion, or load replaces the piece list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    /// Position of the piece in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One direction of a movement template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// File displacement per iteration.
    pub dx: i8,
    /// Rank displacement per iteration.
    pub dy: i8,
    /// Maximum iterations; 0 slides to the edge of the board.
    pub limit: u8,
    /// The piece may land on an empty square in this direction.
    pub can_move: bool,
    /// The piece may capture in this direction.
    pub can_attack: bool,
}

impl Step {
    /// A direction that both moves and captures.
    #[inline]
    pub const fn new(dx: i8, dy: i8, limit: u8) -> Step {
        Step {
            dx,
            dy,
            limit,
            can_move: true,
            can_attack: true,
        }
    }

    /// Same direction, moves only (pawn pushes, kings that may not capture).
    #[inline]
    pub const fn quiet(self) -> Step {
        Step {
            can_attack: false,
            ..self
        }
    }

    /// Same direction, captures only (pawn diagonals).
    #[inline]
    pub const fn attack_only(self) -> Step {
        Step {
            can_move: false,
            ..self
        }
    }
}

/// Stack buffer of template steps. Eight directions cover every piece kind.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    steps: [Step; 8],
    len: u8,
}

impl Template {
    /// Create an empty template.
    pub const fn new() -> Template {
        Template {
            steps: [Step::new(0, 0, 0); 8],
            len: 0,
        }
    }

    /// Build a template from a list of steps.
    pub fn from_steps(steps: &[Step]) -> Template {
        let mut template = Template::new();
        for &step in steps {
            template.push(step);
        }
        template
    }

    /// Append a step.
    #[inline]
    pub fn push(&mut self, step: Step) {
        debug_assert!((self.len as usize) < 8);
        self.steps[self.len as usize] = step;
        self.len += 1;
    }

    /// Number of directions.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Return `true` if there are no directions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The directions in order.
    #[inline]
    pub fn as_slice(&self) -> &[Step] {
        &self.steps[..self.len as usize]
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece with its per-turn move state.
#[derive(Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    moved: bool,
    /// Legal destinations computed for the current turn.
    moves: SquareSet,
    /// Pin line or other constraint the destinations must fall inside.
    restricted: Option<SquareSet>,
    /// For a pawn that just double-stepped: the square it passed over.
    en_passant: Option<Square>,
    pin_immune: bool,
}

impl Piece {
    /// Create a piece that has not moved yet.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            moved: false,
            moves: SquareSet::EMPTY,
            restricted: None,
            en_passant: None,
            pin_immune: false,
        }
    }

    /// Parse a notation letter into a piece standing on `square`.
    pub fn from_letter(c: char, square: Square) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        Some(Piece::new(kind, Color::of_letter(c), square))
    }

    /// Return the same piece with its moved flag set to `moved`.
    pub fn with_moved(mut self, moved: bool) -> Piece {
        self.moved = moved;
        self
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Return `true` once the piece has left its starting square.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Legal destinations for this turn. Empty for the side not to move.
    ///
    /// A king's castling moves appear as the square of the castling rook.
    #[inline]
    pub fn moves(&self) -> SquareSet {
        self.moves
    }

    /// The constraint placed on this piece for the current turn, if any.
    #[inline]
    pub fn restricted(&self) -> Option<SquareSet> {
        self.restricted
    }

    /// The square behind this pawn if it can be captured en passant.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn is_pawn(&self) -> bool {
        self.kind == PieceKind::Pawn
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Notation letter: uppercase for White, lowercase for Black.
    pub fn letter(&self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Move the piece to `to`.
    ///
    /// Two side effects: any change of square marks the piece as moved, and a
    /// pawn moving two ranks records the square it passed over as its
    /// en-passant marker. The marker is returned so the board can remember
    /// which pawn is capturable.
    pub fn relocate(&mut self, to: Square) -> Option<Square> {
        if to == self.square {
            return None;
        }
        let from = self.square;
        self.square = to;
        self.moved = true;
        if self.is_pawn() && from.rank().abs_diff(to.rank()) == 2 {
            let passed = Square::new(to.file(), (from.rank() + to.rank()) / 2);
            self.en_passant = passed;
            return passed;
        }
        None
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    pub(crate) fn set_moves(&mut self, moves: SquareSet) {
        self.moves = moves;
    }

    pub(crate) fn add_moves(&mut self, moves: SquareSet) {
        self.moves |= moves;
    }

    pub(crate) fn restrict(&mut self, mask: SquareSet) {
        self.restricted = Some(mask);
    }

    pub(crate) fn set_en_passant(&mut self, marker: Option<Square>) {
        self.en_passant = marker;
    }

    pub(crate) fn is_pin_immune(&self) -> bool {
        self.pin_immune
    }

    pub(crate) fn set_pin_immune(&mut self, immune: bool) {
        self.pin_immune = immune;
    }

    /// Clear the per-turn scratch state before a generation pass.
    pub(crate) fn freshen(&mut self) {
        self.moves = SquareSet::EMPTY;
        self.restricted = None;
        self.pin_immune = false;
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.letter(), self.square)
    }
}
