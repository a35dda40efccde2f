//! Board engine operations
//!
//! Plain functions over engine state. [`crate::game::engine::BoardEngine`] calls
//! them in order and turns their results into events.
//!
//! - `input` - click and drag state machines feeding the attempt sink
//! - `movement` - speculative application of an accepted move
//! - `promotion` - confirm and cancel of a pawn in limbo
//! - `network_move` - authoritative merge of server moves

pub mod input;
pub mod movement;
pub mod network_move;
pub mod promotion;

pub use input::{InputEffect, InputReconciler};
pub use movement::{apply_speculative, AppliedMove, SpeculativeMove};
pub use network_move::merge_move_made;
pub use promotion::{cancel_promotion, confirm_promotion};
