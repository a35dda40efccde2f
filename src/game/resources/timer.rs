//! Game clocks as last reported by the server

use crate::game::types::PieceColor;
use shared::protocol::ClockTick;

/// Remaining time of both players, in seconds
///
/// Only written by clock messages from the server. Never touches the position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClockState {
    pub white_seconds: f64,
    pub black_seconds: f64,
}

impl ClockState {
    pub fn remaining(&self, color: PieceColor) -> f64 {
        match color {
            PieceColor::White => self.white_seconds,
            PieceColor::Black => self.black_seconds,
        }
    }

    /// Overwrite both clocks with a server tick
    pub fn merge(&mut self, tick: &ClockTick) {
        self.white_seconds = tick.white_player_clock;
        self.black_seconds = tick.black_player_clock;
    }
}

impl From<ClockTick> for ClockState {
    fn from(tick: ClockTick) -> Self {
        Self {
            white_seconds: tick.white_player_clock,
            black_seconds: tick.black_player_clock,
        }
    }
}

/// `mm:ss`, partial seconds rounded up so a clock shows 0:00 only when it is out
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.ceil() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
