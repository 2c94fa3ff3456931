//! Piece kinds and the subset a pawn may promote to.

use std::fmt;
use std::str::FromStr;

use crate::error::MoveError;

/// The kind of a piece, without color information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Return the index (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase notation letter.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a notation letter, ignoring case.
    #[inline]
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece kind a pawn can become on the far rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    /// All promotion choices.
    pub const ALL: [Promotion; 4] = [
        Promotion::Knight,
        Promotion::Bishop,
        Promotion::Rook,
        Promotion::Queen,
    ];

    /// The piece kind the pawn turns into.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }
}

impl FromStr for Promotion {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Promotion, MoveError> {
        let mut chars = s.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_letter(c),
            _ => None,
        };
        match kind {
            Some(PieceKind::Knight) => Ok(Promotion::Knight),
            Some(PieceKind::Bishop) => Ok(Promotion::Bishop),
            Some(PieceKind::Rook) => Ok(Promotion::Rook),
            Some(PieceKind::Queen) => Ok(Promotion::Queen),
            _ => Err(MoveError::InvalidPromotion {
                found: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PieceKind, Promotion};

    #[test]
    fn letter_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
            assert_eq!(
                PieceKind::from_letter(kind.letter().to_ascii_uppercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_letter('x'), None);
        assert_eq!(PieceKind::from_letter('1'), None);
    }

    #[test]
    fn promotion_parsing() {
        assert_eq!("q".parse::<Promotion>().unwrap(), Promotion::Queen);
        assert_eq!("N".parse::<Promotion>().unwrap(), Promotion::Knight);
        assert!("k".parse::<Promotion>().is_err());
        assert!("p".parse::<Promotion>().is_err());
        assert!("qq".parse::<Promotion>().is_err());
        assert!("".parse::<Promotion>().is_err());
    }

    #[test]
    fn promotion_kinds() {
        let kinds: Vec<_> = Promotion::ALL.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Rook,
                PieceKind::Queen
            ]
        );
    }
}
