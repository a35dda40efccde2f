//! Position model - piece placement plus castling rights for one moment of the game
//!
//! The engine owns exactly one [`Position`]. Readers get `&Position`; every write
//! goes through the engine so speculative moves, promotions and server patches
//! stay consistent.

use crate::game::types::{
    BoardPlacement, CastlingRights, PieceColor, PieceRecord, PieceType, Square,
};
use serde::{Deserialize, Serialize};
use shared::protocol::{deserialize_optional_square, PositionPatch};

/// Pieces of the back rank from file a to file h
const BACK_ROW: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// One chess position as seen by the client
///
/// Wire-compatible with the server's parsed FEN object, so a snapshot fetched
/// from the FEN-parsing service deserializes straight into it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "board_placement", default)]
    pub placement: BoardPlacement,
    /// Snapshots from the FEN parser may leave this out; no rights then
    #[serde(default)]
    pub castling_rights: CastlingRights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_to_move: Option<PieceColor>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_square",
        skip_serializing_if = "Option::is_none"
    )]
    pub en_passant_target_square: Option<Square>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halfmove_clock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullmove_number: Option<u32>,
}

impl Position {
    /// Empty board without castling rights
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting position; every piece remembers its starting square
    pub fn standard() -> Self {
        let mut placement = BoardPlacement::new();
        for (file, piece_type) in (0u8..).zip(BACK_ROW) {
            for (color, back_rank, pawn_rank) in
                [(PieceColor::White, 0, 1), (PieceColor::Black, 7, 6)]
            {
                if let Some(square) = Square::from_rank_file(back_rank, file) {
                    placement.insert(
                        square,
                        PieceRecord::new(piece_type, color).with_starting_square(square),
                    );
                }
                if let Some(square) = Square::from_rank_file(pawn_rank, file) {
                    placement.insert(
                        square,
                        PieceRecord::new(PieceType::Pawn, color).with_starting_square(square),
                    );
                }
            }
        }

        Self {
            placement,
            castling_rights: CastlingRights::all(),
            side_to_move: Some(PieceColor::White),
            en_passant_target_square: None,
            halfmove_clock: Some(0),
            fullmove_number: Some(1),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<&PieceRecord> {
        self.placement.get(&square)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.placement.contains_key(&square)
    }

    /// Put `piece` on `square`, returning whatever stood there
    pub fn put(&mut self, square: Square, piece: PieceRecord) -> Option<PieceRecord> {
        self.placement.insert(square, piece)
    }

    /// Clear `square`, returning its former occupant
    pub fn take(&mut self, square: Square) -> Option<PieceRecord> {
        self.placement.remove(&square)
    }

    /// Structural overwrite with a server patch: each supplied field replaces
    /// the local one wholesale, absent fields are untouched
    pub fn apply_patch(&mut self, patch: &PositionPatch) {
        if let Some(placement) = &patch.board_placement {
            self.placement = placement.clone();
        }
        if let Some(rights) = patch.castling_rights {
            self.castling_rights = rights;
        }
        if let Some(side) = patch.side_to_move {
            self.side_to_move = Some(side);
        }
        if let Some(target) = patch.en_passant_target_square {
            self.en_passant_target_square = target;
        }
        if let Some(clock) = patch.halfmove_clock {
            self.halfmove_clock = Some(clock);
        }
        if let Some(number) = patch.fullmove_number {
            self.fullmove_number = Some(number);
        }
    }

    /// Pieces of one color
    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = (Square, &PieceRecord)> {
        self.placement
            .iter()
            .filter(move |(_, piece)| piece.piece_color == color)
            .map(|(square, piece)| (*square, piece))
    }
}
