//! Type definitions for the interactive board
//!
//! The board vocabulary ([`Square`], [`PieceColor`], [`PieceType`], ...) lives in
//! the `shared` crate so the wire protocol can use it; it is re-exported here so
//! game code has a single import path.

pub use shared::types::{
    BoardPlacement, CastlingRights, CastlingSide, InvalidSquare, PieceColor, PieceRecord,
    PieceType, SideRights, Square,
};

use std::fmt;

/// Which side of the board faces the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }

    /// Whether `color` sits at the bottom of the board for this viewer
    pub fn faces(self, color: PieceColor) -> bool {
        matches!(
            (self, color),
            (Orientation::White, PieceColor::White) | (Orientation::Black, PieceColor::Black)
        )
    }
}

impl From<PieceColor> for Orientation {
    fn from(color: PieceColor) -> Self {
        match color {
            PieceColor::White => Orientation::White,
            PieceColor::Black => Orientation::Black,
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<PieceColor>().map(Orientation::from)
    }
}

/// Gesture family that produced a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveMethod {
    Click,
    Drag,
}

impl fmt::Display for MoveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveMethod::Click => f.write_str("click"),
            MoveMethod::Drag => f.write_str("drag"),
        }
    }
}

/// A completed gesture: the player wants to move from `origin` to `destination`
///
/// Lives only between input completion and resolution (apply or discard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveAttempt {
    pub origin: Square,
    pub destination: Square,
    pub method: MoveMethod,
}

impl MoveAttempt {
    pub fn new(origin: Square, destination: Square, method: MoveMethod) -> Self {
        Self {
            origin,
            destination,
            method,
        }
    }

    /// Same squares, regardless of which gesture produced them
    pub fn same_squares(&self, other: &MoveAttempt) -> bool {
        self.origin == other.origin && self.destination == other.destination
    }
}

impl fmt::Display for MoveAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ({})", self.origin, self.destination, self.method)
    }
}

/// Squares of the most recent move, used for last-move highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}
