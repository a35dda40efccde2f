//! Speculative move application
//!
//! Runs after the oracle accepted a move and before the server has seen it.
//! Mutates the position the way the server is expected to, so the board
//! reacts immediately. Castling rights only ever go down here.

use crate::game::error::{GameError, GameResult};
use crate::game::resources::promotion::is_promotion_move;
use crate::game::resources::Position;
use crate::game::rules::castling::{
    castling_side, king_starting_square, rook_castled_square, rook_side_for_start,
    rook_starting_square,
};
use crate::game::types::{CastlingSide, MoveAttempt, PieceColor, PieceRecord, PieceType, Square};
use shared::protocol::{AdditionalInfo, OutboundMove};
use tracing::{debug, warn};

/// How a speculative move changed the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedMove {
    /// Plain relocation, possibly a capture
    Moved { captured: Option<PieceRecord> },
    /// King and rook both relocated
    Castled {
        side: CastlingSide,
        rook_from: Square,
        rook_to: Square,
    },
    /// Pawn is in limbo on its last rank waiting for a piece choice
    PromotionPending { captured: Option<PieceRecord> },
}

/// Result of a speculative application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeculativeMove {
    /// The piece as it stood on the origin before moving
    pub mover: PieceRecord,
    pub applied: AppliedMove,
}

impl SpeculativeMove {
    /// Wire message for this move; `None` while a promotion piece is unknown
    pub fn outbound(&self, attempt: &MoveAttempt) -> Option<OutboundMove> {
        match self.applied {
            AppliedMove::PromotionPending { .. } => None,
            _ => Some(OutboundMove {
                piece_color: self.mover.piece_color,
                piece_type: self.mover.piece_type,
                starting_square: attempt.origin,
                destination_square: attempt.destination,
                additional_info: AdditionalInfo::default(),
            }),
        }
    }
}

/// Apply an oracle-approved move to `position`
pub fn apply_speculative(
    position: &mut Position,
    attempt: &MoveAttempt,
) -> GameResult<SpeculativeMove> {
    let origin = attempt.origin;
    let destination = attempt.destination;
    let mover = *position
        .piece_at(origin)
        .ok_or(GameError::EmptyOrigin { square: origin })?;
    let color = mover.piece_color;

    if mover.piece_type == PieceType::King {
        if origin == king_starting_square(color) {
            if let Some(side) = castling_side(origin, destination) {
                let applied = apply_castle(position, color, side, origin, destination);
                return Ok(SpeculativeMove { mover, applied });
            }
        }
        position.castling_rights.revoke_all(color);
    }

    if is_promotion_move(&mover, destination) {
        position.take(origin);
        let captured = position.put(destination, mover);
        debug!(
            "[MOVE] {} pawn {} -> {} waiting for promotion",
            color, origin, destination
        );
        return Ok(SpeculativeMove {
            mover,
            applied: AppliedMove::PromotionPending { captured },
        });
    }

    if mover.piece_type == PieceType::Rook {
        lower_rook_right(position, &mover);
    }

    let mut moved = mover;
    moved.starting_square = None;
    position.take(origin);
    let captured = position.put(destination, moved);
    if let Some(captured) = &captured {
        lower_captured_rook_right(position, captured, destination);
    }

    debug!("[MOVE] {} {} {} -> {}", color, mover.piece_type, origin, destination);
    Ok(SpeculativeMove {
        mover,
        applied: AppliedMove::Moved { captured },
    })
}

fn apply_castle(
    position: &mut Position,
    color: PieceColor,
    side: CastlingSide,
    origin: Square,
    destination: Square,
) -> AppliedMove {
    let rook_from = rook_starting_square(color, side);
    let rook_to = rook_castled_square(color, side);

    if let Some(king) = position.take(origin) {
        position.put(destination, king);
    }

    match position.take(rook_from) {
        Some(rook) if rook.piece_type == PieceType::Rook && rook.piece_color == color => {
            position.put(rook_to, rook);
        }
        Some(other) => {
            warn!(
                "[MOVE] Castling {} but {} holds {} {}, rook left alone",
                destination, rook_from, other.piece_color, other.piece_type
            );
            position.put(rook_from, other);
        }
        None => {
            warn!("[MOVE] Castling {} with no rook on {}", destination, rook_from);
        }
    }

    position.castling_rights.revoke_all(color);
    debug!(
        "[MOVE] {} castles {:?}: king {} -> {}, rook {} -> {}",
        color, side, origin, destination, rook_from, rook_to
    );
    AppliedMove::Castled {
        side,
        rook_from,
        rook_to,
    }
}

/// A rook leaving its starting square gives up that side's right
fn lower_rook_right(position: &mut Position, rook: &PieceRecord) {
    let Some(start) = rook.starting_square else {
        return;
    };
    if let Some(side) = rook_side_for_start(rook.piece_color, start) {
        position.castling_rights.revoke(rook.piece_color, side);
    }
}

/// Capturing a rook that never moved removes the opponent's right on that side
pub(crate) fn lower_captured_rook_right(
    position: &mut Position,
    captured: &PieceRecord,
    square: Square,
) {
    if captured.piece_type != PieceType::Rook || captured.starting_square != Some(square) {
        return;
    }
    if let Some(side) = rook_side_for_start(captured.piece_color, square) {
        position.castling_rights.revoke(captured.piece_color, side);
    }
}
