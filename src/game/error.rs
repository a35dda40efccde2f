//! Error types for game module
//!
//! Covers move resolution and the local invariants the board engine protects
//! (one pending promotion at a time, promotion choices, occupied origins).

use crate::game::types::{PieceType, Square};

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A move attempt started from an empty square
    #[error("No piece at origin square {square}")]
    EmptyOrigin { square: Square },

    /// The legality oracle rejected the move (or could not answer)
    #[error("Move rejected: {origin} -> {destination}")]
    MoveRejected { origin: Square, destination: Square },

    /// Confirm or cancel called while no promotion is pending
    #[error("No promotion is pending")]
    NoPendingPromotion,

    /// A second promotion was started while one is still open
    #[error("A promotion is already pending on {destination}")]
    PromotionAlreadyPending { destination: Square },

    /// Pawns cannot become kings or stay pawns
    #[error("Cannot promote to {piece_type}")]
    InvalidPromotionChoice { piece_type: PieceType },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
