//! Authoritative merge of server moves
//!
//! The server always wins: every field it supplies overwrites the local one,
//! whatever the speculative applier did before. Merging the same message twice
//! leaves the position unchanged the second time.

use crate::game::events::MoveCue;
use crate::game::resources::Position;
use crate::game::types::LastMove;
use shared::protocol::MoveMade;
use tracing::info;

/// Merge a `move_made` message into `position`
pub fn merge_move_made(position: &mut Position, made: &MoveMade) -> (LastMove, MoveCue) {
    position.apply_patch(&made.new_parsed_fen);

    let last_move = LastMove {
        from: made.move_data.starting_square,
        to: made.move_data.destination_square,
    };
    let cue = MoveCue::from_move_type(made.move_type.as_deref());
    info!(
        "[NETWORK_MOVE] Server move {} -> {} ({})",
        last_move.from, last_move.to, cue
    );
    (last_move, cue)
}
