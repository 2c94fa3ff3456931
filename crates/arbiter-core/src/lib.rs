//! Core chess rules: board representation, legal move generation, move
//! application, the explosive variant, notation and clocks.

mod atomic;
mod board;
mod castle_rights;
mod clock;
mod color;
mod config;
mod error;
mod fen;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod registry;
mod square;
mod square_set;
mod team;

pub use board::{Board, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide};
pub use clock::ClockConfig;
pub use color::Color;
pub use config::GameConfig;
pub use error::{BoardError, ConfigError, FenError, MoveError};
pub use fen::STARTING_FEN;
pub use make_move::{MoveKind, MoveOutcome};
pub use movegen::GameStatus;
pub use perft::{divide, perft};
pub use piece::{Piece, PieceId, Step, Template};
pub use piece_kind::{PieceKind, Promotion};
pub use registry::{Registry, TemplateFn, Variant};
pub use square::Square;
pub use square_set::SquareSet;
pub use team::Team;
