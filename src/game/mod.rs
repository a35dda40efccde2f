//! Interactive chessboard logic
//!
//! Everything between a player's gesture and the bytes on the wire, and back:
//!
//! - `types` - board vocabulary, orientation, move attempts
//! - `board_utils` - square geometry and on-screen ordering
//! - `resources` - state owned by the engine (position, selections, promotion, clocks)
//! - `systems` - operations over that state (input, speculative moves, promotion, merges)
//! - `rules` - castling geometry
//! - `engine` - [`BoardEngine`], the single owner and writer of all of it
//! - `events` - what the engine reports back to the host

pub mod board_utils;
pub mod engine;
pub mod error;
pub mod events;
pub mod resources;
pub mod rules;
pub mod systems;
pub mod types;

pub use engine::BoardEngine;
pub use error::{GameError, GameResult};
pub use events::{BoardEvent, GameOutcome, MoveCue};
