//! Error types for notation parsing, board validation, moves and game setup.

use crate::square::Square;

/// Errors that occur when parsing a notation string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The string has neither 6 fields nor 6 fields plus a clock block.
    #[error("expected 6 or 7 notation fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in the string, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// A castling letter names a king or rook that is not on its home square.
    #[error("castling right '{right}' has no matching king and rook")]
    MissingCastlingPiece {
        /// The castling letter.
        right: char,
    },
    /// A string that should be a square is not one.
    #[error("invalid square: \"{found}\"")]
    InvalidSquare {
        /// The invalid square string.
        found: String,
    },
    /// The en passant field is not "-" or a target square with a pawn in front of it.
    #[error("invalid en passant target: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The clock block is not `total,increment,white,black`.
    #[error("invalid clock block: \"{found}\"")]
    InvalidClock {
        /// The invalid clock string.
        found: String,
    },
    /// The parsed board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from structural validation of a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// Two pieces claim the same square.
    #[error("more than one piece on {square}")]
    OverlappingPieces {
        /// The contested square.
        square: Square,
    },
    /// The registry has no movement template for a piece on the board.
    #[error("no movement template registered for '{letter}'")]
    UnregisteredPiece {
        /// Notation letter of the piece.
        letter: char,
    },
}

/// Errors from submitting a move through the checked entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game already has a result.
    #[error("the game is over")]
    GameOver,
    /// A promotion choice is still outstanding.
    #[error("a pawn on {square} is waiting to be promoted")]
    PromotionPending {
        /// Square of the pawn awaiting promotion.
        square: Square,
    },
    /// There is no piece on the source square.
    #[error("no piece on {square}")]
    EmptySquare {
        /// The empty source square.
        square: Square,
    },
    /// The piece on the source square belongs to the side not to move.
    #[error("the piece on {square} does not belong to the side to move")]
    WrongSide {
        /// The source square.
        square: Square,
    },
    /// The destination is not among the piece's legal moves.
    #[error("{from}{to} is not a legal move")]
    IllegalMove {
        /// Source square.
        from: Square,
        /// Destination square.
        to: Square,
    },
    /// The piece asked to promote is not a pawn on its last rank.
    #[error("the piece on {square} cannot promote")]
    CannotPromote {
        /// Square of the piece.
        square: Square,
    },
    /// The promotion choice is not one of `n`, `b`, `r`, `q`.
    #[error("invalid promotion piece: \"{found}\"")]
    InvalidPromotion {
        /// The invalid choice.
        found: String,
    },
}

/// Errors from parsing the game setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The variant token is not registered.
    #[error("unknown variant: \"{token}\"")]
    UnknownVariant {
        /// The unrecognized token.
        token: String,
    },
    /// The clock spec is not `total,increment` in whole seconds.
    #[error("invalid clock spec: \"{found}\" (expected total,increment)")]
    InvalidClock {
        /// The invalid clock string.
        found: String,
    },
}
