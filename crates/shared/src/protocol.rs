//! Game server wire protocol
//!
//! Frames are JSON text over the per-game WebSocket. The server pushes
//! [`InboundMessage`]s tagged by `type`; the client sends untagged
//! [`OutboundMove`] objects.

use crate::types::{BoardPlacement, CastlingRights, PieceColor, PieceType, Square};
use serde::{Deserialize, Deserializer, Serialize};

/// Errors raised while decoding or encoding frames
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Frame is not JSON or a known message is missing fields
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Server → Client messages
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// A move was accepted by the server
    MoveMade(MoveMade),

    /// Both clocks after a tick (or an increment)
    #[serde(alias = "timer_incremented")]
    TimerDecremented(ClockTick),

    /// Any message type this client does not know about
    #[serde(other)]
    Unknown,
}

/// Authoritative move delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveMade {
    pub new_parsed_fen: PositionPatch,
    pub move_data: MoveData,
    #[serde(default)]
    pub move_type: Option<String>,
}

/// Squares of the move the server accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub starting_square: Square,
    pub destination_square: Square,
}

/// Remaining time of both players, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockTick {
    pub white_player_clock: f64,
    pub black_player_clock: f64,
}

/// Partial position sent by the server
///
/// Every field that is present replaces the local field wholesale. Absent
/// fields leave local state alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_placement: Option<BoardPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub castling_rights: Option<CastlingRights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_to_move: Option<PieceColor>,
    /// `Some(None)` clears the target; the server writes it as `null` or `"-"`
    #[serde(
        default,
        deserialize_with = "deserialize_en_passant",
        skip_serializing_if = "Option::is_none"
    )]
    pub en_passant_target_square: Option<Option<Square>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub halfmove_clock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullmove_number: Option<u32>,
}

/// Optional square written as a number, a numeric string, `null` or `"-"`
pub fn deserialize_optional_square<'de, D>(deserializer: D) -> Result<Option<Square>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(ref s) if s == "-" || s.is_empty() => Ok(None),
        other => Square::deserialize(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn deserialize_en_passant<'de, D>(deserializer: D) -> Result<Option<Option<Square>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_square(deserializer).map(Some)
}

/// Extra data attached to an outbound move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_piece: Option<PieceType>,
}

/// Client → Server move submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMove {
    pub piece_color: PieceColor,
    pub piece_type: PieceType,
    pub starting_square: Square,
    pub destination_square: Square,
    #[serde(default)]
    pub additional_info: AdditionalInfo,
}

impl OutboundMove {
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode one text frame from the server
pub fn parse_inbound(text: &str) -> ProtocolResult<InboundMessage> {
    Ok(serde_json::from_str(text)?)
}
