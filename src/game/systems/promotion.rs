//! Promotion confirm and cancel
//!
//! Both operate on a [`PendingPromotion`] taken out of the engine, so a
//! promotion can be resolved at most once.

use crate::game::error::{GameError, GameResult};
use crate::game::resources::{PendingPromotion, Position};
use crate::game::systems::movement::lower_captured_rook_right;
use crate::game::types::{PieceRecord, PieceType};
use shared::protocol::{AdditionalInfo, OutboundMove};
use tracing::info;

/// Turn the pawn in limbo into `piece_type` and build the message to send
///
/// The wire message keeps `piece_type: pawn` and names the new piece in
/// `additional_info.promoted_piece`.
pub fn confirm_promotion(
    position: &mut Position,
    pending: &PendingPromotion,
    piece_type: PieceType,
) -> GameResult<OutboundMove> {
    if !piece_type.is_promotion_choice() {
        return Err(GameError::InvalidPromotionChoice { piece_type });
    }

    position.put(
        pending.destination,
        PieceRecord::new(piece_type, pending.color),
    );
    if let Some(captured) = &pending.captured_piece {
        lower_captured_rook_right(position, captured, pending.destination);
    }

    info!(
        "[PROMOTION] {} pawn promoted to {} on {}",
        pending.color, piece_type, pending.destination
    );
    Ok(OutboundMove {
        piece_color: pending.color,
        piece_type: PieceType::Pawn,
        starting_square: pending.origin,
        destination_square: pending.destination,
        additional_info: AdditionalInfo {
            promoted_piece: Some(piece_type),
        },
    })
}

/// Put the pawn back on its origin and restore whatever it captured
pub fn cancel_promotion(position: &mut Position, pending: &PendingPromotion) {
    let pawn = position
        .take(pending.destination)
        .filter(|piece| piece.piece_type == PieceType::Pawn && piece.piece_color == pending.color)
        .unwrap_or_else(|| PieceRecord::new(PieceType::Pawn, pending.color));
    position.put(pending.origin, pawn);

    if let Some(captured) = pending.captured_piece {
        if captured.piece_color != pending.color {
            position.put(pending.destination, captured);
        }
    }

    info!(
        "[PROMOTION] Promotion on {} cancelled, pawn back on {}",
        pending.destination, pending.origin
    );
}
