//! Castling sides and the castling-rights field of the notation string.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    QueenSide = 0,
    KingSide = 1,
}

impl CastleSide {
    /// Both sides, queen side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::QueenSide, CastleSide::KingSide];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// File the castling rook starts on.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::QueenSide => 0,
            CastleSide::KingSide => 7,
        }
    }

    /// File the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::QueenSide => 2,
            CastleSide::KingSide => 6,
        }
    }

    /// File the rook lands on.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::QueenSide => 3,
            CastleSide::KingSide => 5,
        }
    }

    /// The side a rook on `file` castles toward, judged against the king's file.
    #[inline]
    pub const fn toward(king_file: u8, file: u8) -> CastleSide {
        if file < king_file {
            CastleSide::QueenSide
        } else {
            CastleSide::KingSide
        }
    }

    /// Notation letter for `color` castling on this side (`K`, `Q`, `k`, `q`).
    pub const fn letter(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => 'K',
            (Color::White, CastleSide::QueenSide) => 'Q',
            (Color::Black, CastleSide::KingSide) => 'k',
            (Color::Black, CastleSide::QueenSide) => 'q',
        }
    }
}

/// Castling rights as a 4-bit field, one bit per color and side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    #[inline]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        1 << (color.index() * 2 + side.index())
    }

    /// Return `true` if `color` may castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    /// Return a copy with the right for `color` on `side` added.
    #[inline]
    pub const fn with(self, color: Color, side: CastleSide) -> CastleRights {
        CastleRights(self.0 | Self::bit(color, side))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse the castling field (`"KQkq"`, `"Kq"`, `"-"`).
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }
        if s.is_empty() {
            return Err(FenError::InvalidCastlingChar { character: ' ' });
        }
        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::KingSide),
                'Q' => (Color::White, CastleSide::QueenSide),
                'k' => (Color::Black, CastleSide::KingSide),
                'q' => (Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            rights = rights.with(color, side);
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for color in Color::ALL {
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                if self.has(color, side) {
                    write!(f, "{}", side.letter(color))?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;

    #[test]
    fn parse_and_display() {
        for field in ["KQkq", "Kq", "k", "-", "Qk"] {
            let rights = CastleRights::from_fen(field).unwrap();
            assert_eq!(format!("{rights}"), field);
        }
        assert_eq!(CastleRights::from_fen("KQkq").unwrap(), CastleRights::ALL);
    }

    #[test]
    fn canonical_order_on_output() {
        let rights = CastleRights::from_fen("qkQK").unwrap();
        assert_eq!(format!("{rights}"), "KQkq");
    }

    #[test]
    fn invalid_characters() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("1").is_err());
        assert!(CastleRights::from_fen("").is_err());
    }

    #[test]
    fn has_per_color_and_side() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
    }

    #[test]
    fn side_geometry() {
        assert_eq!(CastleSide::KingSide.king_target_file(), 6);
        assert_eq!(CastleSide::KingSide.rook_target_file(), 5);
        assert_eq!(CastleSide::QueenSide.king_target_file(), 2);
        assert_eq!(CastleSide::QueenSide.rook_target_file(), 3);
        assert_eq!(CastleSide::toward(4, 0), CastleSide::QueenSide);
        assert_eq!(CastleSide::toward(4, 7), CastleSide::KingSide);
        assert_eq!(CastleSide::QueenSide.letter(Color::Black), 'q');
    }
}
