//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use crate::error::FenError;
use crate::square_set::SquareSet;

/// A square on the board as a (file, rank) pair, both in `0..8`.
///
/// File 0 is the a-file and rank 0 is White's back rank, so `Square::new(4, 3)`
/// is e4.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

macro_rules! named_squares {
    ($($name:ident = ($file:expr, $rank:expr)),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square { file: $file, rank: $rank };)*
        }
    };
}

named_squares! {
    A1 = (0, 0), B1 = (1, 0), C1 = (2, 0), D1 = (3, 0), E1 = (4, 0), F1 = (5, 0), G1 = (6, 0), H1 = (7, 0),
    A2 = (0, 1), B2 = (1, 1), C2 = (2, 1), D2 = (3, 1), E2 = (4, 1), F2 = (5, 1), G2 = (6, 1), H2 = (7, 1),
    A3 = (0, 2), B3 = (1, 2), C3 = (2, 2), D3 = (3, 2), E3 = (4, 2), F3 = (5, 2), G3 = (6, 2), H3 = (7, 2),
    A4 = (0, 3), B4 = (1, 3), C4 = (2, 3), D4 = (3, 3), E4 = (4, 3), F4 = (5, 3), G4 = (6, 3), H4 = (7, 3),
    A5 = (0, 4), B5 = (1, 4), C5 = (2, 4), D5 = (3, 4), E5 = (4, 4), F5 = (5, 4), G5 = (6, 4), H5 = (7, 4),
    A6 = (0, 5), B6 = (1, 5), C6 = (2, 5), D6 = (3, 5), E6 = (4, 5), F6 = (5, 5), G6 = (6, 5), H6 = (7, 5),
    A7 = (0, 6), B7 = (1, 6), C7 = (2, 6), D7 = (3, 6), E7 = (4, 6), F7 = (5, 6), G7 = (6, 6), H7 = (7, 6),
    A8 = (0, 7), B8 = (1, 7), C8 = (2, 7), D8 = (3, 7), E8 = (4, 7), F8 = (5, 7), G8 = (6, 7), H8 = (7, 7),
}

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square, returning `None` when either coordinate is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Create a square from its index (`rank * 8 + file`).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square {
                file: index % 8,
                rank: index / 8,
            })
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::new(file, rank)
    }

    /// Return the index `rank * 8 + file` (a1 = 0, h8 = 63).
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// File, 0 = a.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Rank, 0 = first rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// The square displaced by `(dx, dy)`, or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let file = self.file as i8 + dx;
        let rank = self.rank as i8 + dy;
        if file < 0 || rank < 0 {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }

    /// Chebyshev distance between two squares.
    #[inline]
    pub const fn distance(self, other: Square) -> u8 {
        let df = self.file.abs_diff(other.file);
        let dr = self.rank.abs_diff(other.rank);
        if df > dr { df } else { dr }
    }

    /// Return `true` if the squares touch (king-move distance of exactly one).
    #[inline]
    pub const fn is_adjacent(self, other: Square) -> bool {
        self.distance(other) == 1
    }

    /// The up-to-eight squares surrounding this one.
    pub fn neighbors(self) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(sq) = self.offset(dx, dy) {
                    set.insert(sq);
                }
            }
        }
        set
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).filter_map(Square::from_index)
    }
}

impl FromStr for Square {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Square, FenError> {
        Square::from_algebraic(s).ok_or_else(|| FenError::InvalidSquare {
            found: s.to_string(),
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn coordinates_and_index() {
        assert_eq!(Square::new(4, 3), Some(Square::E4));
        assert_eq!(Square::E4.file(), 4);
        assert_eq!(Square::E4.rank(), 3);
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H8.index(), 63);
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn index_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.index() as u8), Some(sq));
        }
        assert_eq!(Square::all().count(), Square::COUNT);
        assert!(Square::from_index(64).is_none());
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!("e3".parse::<Square>().unwrap(), Square::E3);
        assert_eq!(format!("{}", Square::C6), "c6");
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("A1").is_none());
        assert!(Square::from_algebraic("a").is_none());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(Square::E4.offset(1, 1), Some(Square::F5));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::B1.offset(-1, 2), Some(Square::A3));
    }

    #[test]
    fn neighbors_and_adjacency() {
        assert_eq!(Square::E4.neighbors().count(), 8);
        assert_eq!(Square::A1.neighbors().count(), 3);
        assert_eq!(Square::A4.neighbors().count(), 5);
        assert!(Square::E4.is_adjacent(Square::D5));
        assert!(!Square::E4.is_adjacent(Square::E4));
        assert!(!Square::E4.is_adjacent(Square::E6));
        assert_eq!(Square::A1.distance(Square::H8), 7);
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", Square::E4), "Square(e4)");
    }
}
