//! Per-side countdown clock with a fixed increment per move.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::Board;
use crate::color::Color;
use crate::error::ConfigError;

/// Time control: starting seconds per side plus seconds added after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockConfig {
    /// Seconds each side starts with.
    pub total: u32,
    /// Seconds added to the mover after every move.
    pub increment: u32,
}

impl ClockConfig {
    pub const fn new(total: u32, increment: u32) -> ClockConfig {
        ClockConfig { total, increment }
    }
}

/// Parses `"total,increment"`, e.g. `"300,5"`.
impl FromStr for ClockConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<ClockConfig, ConfigError> {
        let invalid = || ConfigError::InvalidClock {
            found: s.to_string(),
        };
        let (total, increment) = s.trim().split_once(',').ok_or_else(invalid)?;
        let total = total.trim().parse::<u32>().map_err(|_| invalid())?;
        let increment = increment.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(ClockConfig { total, increment })
    }
}

impl fmt::Display for ClockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.total, self.increment)
    }
}

impl Board {
    /// Charge `seconds` to the side to move.
    ///
    /// Returns the winner when this tick runs the side's clock out. Does
    /// nothing on a board without a clock or after the game has ended.
    pub fn tick(&mut self, seconds: u32) -> Option<Color> {
        if self.clock().is_none() || self.is_over() {
            return None;
        }
        let side = self.side_to_move();
        let left = self.remaining(side).saturating_sub(seconds);
        self.set_remaining(side, left);
        if left > 0 {
            return None;
        }
        let winner = side.flip();
        debug!(loser = %side, "flag fell");
        self.set_winner(Some(winner));
        Some(winner)
    }
}
