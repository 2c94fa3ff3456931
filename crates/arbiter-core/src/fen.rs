//! Notation string parsing and serialization for [`Board`].
//!
//! The format is FEN with an optional seventh field carrying the clock as
//! `total,increment,white_remaining,black_remaining`.

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide};
use crate::clock::ClockConfig;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::registry::{Registry, Variant};
use crate::square::Square;

/// The notation string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    /// Parse a standard-chess position with the standard registry.
    fn from_str(fen: &str) -> Result<Board, FenError> {
        Board::from_fen_with(Registry::standard(), Variant::Standard, fen)
    }
}

impl Board {
    /// Parse a position to be played under `variant`.
    ///
    /// Every piece is loaded as having moved, except kings and rooks named by
    /// the castling field. The legal moves of the side to move are computed
    /// before returning.
    pub fn from_fen_with(registry: Registry, variant: Variant, fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(6..=7).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut pieces = parse_placement(fields[0])?;

        let side_to_move = Color::from_fen_str(fields[1]).ok_or_else(|| FenError::InvalidColor {
            found: fields[1].to_string(),
        })?;

        let castling = CastleRights::from_fen(fields[2])?;
        restore_castling(&mut pieces, castling)?;
        restore_en_passant(&mut pieces, fields[3], side_to_move)?;

        let halfmove_clock = fields[4].parse::<u32>().map_err(|_| FenError::InvalidMoveCounter {
            field: "halfmove clock",
            found: fields[4].to_string(),
        })?;
        let fullmove_number =
            fields[5]
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter {
                    field: "fullmove number",
                    found: fields[5].to_string(),
                })?;

        let clock = fields.get(6).map(|block| parse_clock_block(block)).transpose()?;

        Board::validate_pieces(&registry, variant, &pieces)?;

        let mut board = Board::empty(registry, variant);
        board.set_side_to_move(side_to_move);
        let total_turns = match side_to_move {
            Color::White => fullmove_number.saturating_mul(2).saturating_sub(1),
            Color::Black => fullmove_number.saturating_mul(2),
        };
        board.set_total_turns(total_turns.max(1));
        board.set_halfmove_clock(halfmove_clock);
        if let Some((config, white, black)) = clock {
            board.set_clock(Some(config));
            board.set_remaining(Color::White, white);
            board.set_remaining(Color::Black, black);
        }
        board.set_pieces(pieces);
        board.calculate_all_moves();
        Ok(board)
    }

    /// Castling rights implied by the moved flags of the kings and corner rooks.
    pub fn castle_rights(&self) -> CastleRights {
        let mut rights = CastleRights::NONE;
        for color in Color::ALL {
            let team = self.team(color);
            let Some(king) = team.king().map(|id| self.piece(id)) else {
                continue;
            };
            if king.has_moved() || king.square().rank() != color.home_rank() {
                continue;
            }
            for side in CastleSide::ALL {
                if team
                    .rook(side)
                    .is_some_and(|id| !self.piece(id).has_moved())
                {
                    rights = rights.with(color, side);
                }
            }
        }
        rights
    }
}

fn parse_placement(placement: &str) -> Result<Vec<Piece>, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount {
            found: ranks.len(),
        });
    }

    let mut pieces = Vec::new();
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // Ranks are listed from 8 down to 1.
        let rank = 7 - rank_index as u8;
        let mut file: u8 = 0;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file = file.saturating_add(digit as u8);
                continue;
            }
            let Some(sq) = Square::new(file, rank) else {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize + 1,
                });
            };
            let piece = Piece::from_letter(c, sq)
                .ok_or(FenError::InvalidPieceChar { character: c })?;
            pieces.push(piece.with_moved(true));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file as usize,
            });
        }
    }
    Ok(pieces)
}

/// Clear the moved flags of the king and rook behind every castling letter.
fn restore_castling(pieces: &mut [Piece], rights: CastleRights) -> Result<(), FenError> {
    for color in Color::ALL {
        let home = color.home_rank();
        for side in CastleSide::ALL {
            if !rights.has(color, side) {
                continue;
            }
            let missing = FenError::MissingCastlingPiece {
                right: side.letter(color),
            };
            let king = pieces
                .iter()
                .position(|p| p.is_king() && p.color() == color && p.square().rank() == home)
                .ok_or_else(|| missing.clone())?;
            let corner = Square::new(side.rook_file(), home);
            let rook = pieces
                .iter()
                .position(|p| {
                    p.kind() == PieceKind::Rook
                        && p.color() == color
                        && Some(p.square()) == corner
                })
                .ok_or(missing)?;
            pieces[king].set_moved(false);
            pieces[rook].set_moved(false);
        }
    }
    Ok(())
}

/// Put the en-passant marker back on the pawn that just double-stepped.
fn restore_en_passant(pieces: &mut [Piece], field: &str, side_to_move: Color) -> Result<(), FenError> {
    if field == "-" {
        return Ok(());
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let target: Square = field.parse().map_err(|_| invalid())?;
    let mover = side_to_move.flip();
    let passed_rank = mover.pawn_rank() as i8 + mover.pawn_direction();
    if target.rank() as i8 != passed_rank {
        return Err(invalid());
    }
    let pawn_sq = target
        .offset(0, mover.pawn_direction())
        .ok_or_else(invalid)?;
    let pawn = pieces
        .iter()
        .position(|p| p.is_pawn() && p.color() == mover && p.square() == pawn_sq)
        .ok_or_else(invalid)?;
    if pieces.iter().any(|p| p.square() == target) {
        return Err(invalid());
    }
    pieces[pawn].set_en_passant(Some(target));
    Ok(())
}

/// Parse `total,increment,white,black`.
fn parse_clock_block(block: &str) -> Result<(ClockConfig, u32, u32), FenError> {
    let invalid = || FenError::InvalidClock {
        found: block.to_string(),
    };
    let values = block
        .split(',')
        .map(|v| v.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<u32>, FenError>>()?;
    match values.as_slice() {
        &[total, increment, white, black] => {
            Ok((ClockConfig::new(total, increment), white, black))
        }
        _ => Err(invalid()),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;
            for file in 0u8..8 {
                match Square::new(file, rank).and_then(|sq| self.piece_on(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.letter())?;
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", self.castle_rights())?;
        match self.en_passant_target() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())?;

        if let Some(clock) = self.clock() {
            write!(
                f,
                " {},{},{},{}",
                clock.total,
                clock.increment,
                self.remaining(Color::White),
                self.remaining(Color::Black)
            )?;
        }
        Ok(())
    }
}
