//! Client-wide resources
//!
//! Preferences the player can change between games. They shape how the board
//! engine reacts to input but never what the server accepts.

use serde::{Deserialize, Serialize};

/// Gameplay preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Promote to a queen without asking
    pub auto_queen: bool,

    /// Highlight legal destinations of the selected piece
    pub show_legal_moves: bool,

    /// Turn the board after every local move (pass-and-play)
    #[serde(alias = "flipOnMove")]
    pub flip_on_move: bool,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            auto_queen: false,
            show_legal_moves: true,
            flip_on_move: false,
        }
    }
}
