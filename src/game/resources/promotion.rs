//! Promotion limbo
//!
//! While a [`PendingPromotion`] is alive the pawn already stands on its
//! destination and the origin is empty. Confirm finalizes the piece type;
//! cancel puts everything back, including a captured piece.

use crate::game::types::{
    MoveMethod, Orientation, PieceColor, PieceRecord, PieceType, Square,
};

/// Whether `piece` moving to `destination` must promote
///
/// Any pawn reaching its last rank qualifies, whatever file it came from.
pub fn is_promotion_move(piece: &PieceRecord, destination: Square) -> bool {
    piece.piece_type == PieceType::Pawn && destination.rank() == piece.piece_color.promotion_rank()
}

/// The one promotion waiting for a piece choice
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPromotion {
    pub origin: Square,
    pub destination: Square,
    pub color: PieceColor,
    /// Whatever stood on the destination before the pawn arrived
    pub captured_piece: Option<PieceRecord>,
    pub method: MoveMethod,
}

impl PendingPromotion {
    pub fn choices(&self, orientation: Orientation) -> PromotionChoices {
        PromotionChoices::for_view(self.color, orientation)
    }
}

/// Edge of the board the choice popup hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAnchor {
    Top,
    Bottom,
}

/// Layout of the promotion popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionChoices {
    pub anchor: PopupAnchor,
    /// Choices in reading order, starting at the anchored edge
    pub order: [PieceType; 4],
}

impl PromotionChoices {
    /// The promoting color's last rank is at the top when the board faces it,
    /// and the queen always sits next to the edge
    pub fn for_view(color: PieceColor, orientation: Orientation) -> Self {
        let [queen, rook, knight, bishop] = PieceType::PROMOTION_CHOICES;
        if orientation.faces(color) {
            Self {
                anchor: PopupAnchor::Top,
                order: [queen, rook, knight, bishop],
            }
        } else {
            Self {
                anchor: PopupAnchor::Bottom,
                order: [bishop, knight, rook, queen],
            }
        }
    }
}
