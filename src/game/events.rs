//! Events the board engine reports to its host
//!
//! The engine never draws or plays sounds itself. Every state change that a
//! front end may want to reflect is pushed as a [`BoardEvent`] and drained with
//! [`crate::game::engine::BoardEngine::drain_events`].

use crate::game::resources::{ClockState, PromotionChoices};
use crate::game::systems::movement::AppliedMove;
use crate::game::types::{LastMove, MoveAttempt, Orientation, PieceColor, PieceType, Square};
use shared::protocol::OutboundMove;
use std::fmt;

/// Feedback cue for an authoritative move, taken from the server's `move_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveCue {
    #[default]
    Move,
    Capture,
    Castle,
    Promotion,
    Check,
    GameEnd,
}

impl MoveCue {
    /// Unknown or missing move types fall back to a plain move
    pub fn from_move_type(move_type: Option<&str>) -> Self {
        let Some(move_type) = move_type else {
            return MoveCue::Move;
        };
        match move_type.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "capture" => MoveCue::Capture,
            "castle" | "castling" => MoveCue::Castle,
            "promotion" | "promote" => MoveCue::Promotion,
            "check" => MoveCue::Check,
            "game_end" | "game_over" | "checkmate" | "stalemate" => MoveCue::GameEnd,
            _ => MoveCue::Move,
        }
    }
}

impl fmt::Display for MoveCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveCue::Move => "move",
            MoveCue::Capture => "capture",
            MoveCue::Castle => "castle",
            MoveCue::Promotion => "promotion",
            MoveCue::Check => "check",
            MoveCue::GameEnd => "game end",
        };
        f.write_str(name)
    }
}

/// How a game ended, as reported by the legality oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: PieceColor },
    Stalemate,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Legal-destination markers changed; `origin` is `None` once cleared
    HighlightsChanged {
        origin: Option<Square>,
        destinations: Vec<Square>,
    },

    /// A local move was accepted by the oracle and applied to the position
    MoveApplied {
        attempt: MoveAttempt,
        applied: AppliedMove,
    },

    /// The oracle rejected a local move (or could not be reached)
    MoveRejected { attempt: MoveAttempt },

    /// A pawn is waiting for its promotion piece
    PromotionOpened {
        destination: Square,
        color: PieceColor,
        choices: PromotionChoices,
    },

    PromotionResolved {
        destination: Square,
        piece_type: PieceType,
    },

    PromotionCancelled { origin: Square, destination: Square },

    /// Move handed to an open channel
    MoveSent(OutboundMove),

    /// Channel was not open, the move was not transmitted
    MoveDropped(OutboundMove),

    /// The server's version of a move has been merged
    AuthoritativeMove { last_move: LastMove, cue: MoveCue },

    ClockUpdated(ClockState),

    OrientationFlipped(Orientation),

    /// The whole position was replaced
    PositionLoaded,

    GameEnded(GameOutcome),
}
