//! Board vocabulary shared by the client and the game server wire format
//!
//! Squares are linear indices `0..=63` with `a1 = 0`, `h1 = 7` and `h8 = 63`.
//! The server emits squares either as JSON numbers or as numeric strings (they
//! double as object keys in `board_placement`), so [`Square`] accepts both.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Error returned when a square index or name does not denote a board square
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSquare {
    #[error("square index {0} is outside 0-63")]
    OutOfRange(u64),

    #[error("'{0}' is not a square")]
    Unparsable(String),
}

/// Linear board index, always in `0..=63`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Create a square from its linear index
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Create a square from 0-based rank and file indices
    pub const fn from_rank_file(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Linear index (0-63)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Rank index (0 = rank 1)
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// File index (0 = file a)
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Every square from a1 to h8
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Parse algebraic notation such as `"e4"`
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        let file = match file_char.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return None,
        };
        let rank = match rank_char {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return None,
        };

        Square::from_rank_file(rank, file)
    }

    /// Algebraic notation such as `"e4"`
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl TryFrom<u8> for Square {
    type Error = InvalidSquare;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Square::new(value).ok_or(InvalidSquare::OutOfRange(u64::from(value)))
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> Self {
        square.0
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    /// Accepts a linear index (`"12"`) or algebraic notation (`"e2"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u64>() {
            return u8::try_from(index)
                .ok()
                .and_then(Square::new)
                .ok_or(InvalidSquare::OutOfRange(index));
        }
        Square::from_algebraic(trimmed).ok_or_else(|| InvalidSquare::Unparsable(s.to_string()))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

struct SquareVisitor;

impl<'de> Visitor<'de> for SquareVisitor {
    type Value = Square;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a square index between 0 and 63, as a number or a string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Square, E> {
        u8::try_from(value)
            .ok()
            .and_then(Square::new)
            .ok_or_else(|| E::custom(InvalidSquare::OutOfRange(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Square, E> {
        let value = u64::try_from(value).map_err(|_| E::custom("negative square index"))?;
        self.visit_u64(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Square, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SquareVisitor)
    }
}

/// Side a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank index a pawn of this color promotes on
    pub fn promotion_rank(self) -> u8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(PieceColor::White),
            "black" | "b" => Ok(PieceColor::Black),
            _ => Err(format!("unknown piece color '{s}'")),
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Pieces a pawn may become
    pub const PROMOTION_CHOICES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
    ];

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceType::King => "king",
            PieceType::Queen => "queen",
            PieceType::Rook => "rook",
            PieceType::Bishop => "bishop",
            PieceType::Knight => "knight",
            PieceType::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "king" | "k" => Ok(PieceType::King),
            "queen" | "q" => Ok(PieceType::Queen),
            "rook" | "r" => Ok(PieceType::Rook),
            "bishop" | "b" => Ok(PieceType::Bishop),
            "knight" | "n" => Ok(PieceType::Knight),
            "pawn" | "p" => Ok(PieceType::Pawn),
            _ => Err(format!("unknown piece type '{s}'")),
        }
    }
}

// Colors and piece types go over the wire lowercase but the server is not
// consistent about casing, so parsing is case-insensitive.
macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

string_serde!(PieceColor);
string_serde!(PieceType);

/// One piece on the board
///
/// `starting_square` remembers where this piece instance started the game (or
/// the castling sequence). It tells the two rooks of a color apart when deciding
/// which castling right a rook move gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub piece_type: PieceType,
    pub piece_color: PieceColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_square: Option<Square>,
}

impl PieceRecord {
    pub fn new(piece_type: PieceType, piece_color: PieceColor) -> Self {
        Self {
            piece_type,
            piece_color,
            starting_square: None,
        }
    }

    pub fn with_starting_square(mut self, square: Square) -> Self {
        self.starting_square = Some(square);
        self
    }
}

/// Sparse map of occupied squares; a key exists only when a piece stands there
pub type BoardPlacement = BTreeMap<Square, PieceRecord>;

/// Which side of the board a castle goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

/// Castling rights of one color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideRights {
    #[serde(rename = "Kingside", alias = "kingside")]
    pub kingside: bool,
    #[serde(rename = "Queenside", alias = "queenside")]
    pub queenside: bool,
}

impl SideRights {
    pub fn get(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::Kingside => self.kingside,
            CastlingSide::Queenside => self.queenside,
        }
    }
}

/// Castling rights of both colors
///
/// Local code can only lower a right ([`CastlingRights::revoke`]); rights come
/// back only when a whole position or a server patch replaces this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    #[serde(rename = "White", alias = "white")]
    pub white: SideRights,
    #[serde(rename = "Black", alias = "black")]
    pub black: SideRights,
}

impl CastlingRights {
    /// Every right available, as in the initial position
    pub fn all() -> Self {
        let full = SideRights {
            kingside: true,
            queenside: true,
        };
        Self {
            white: full,
            black: full,
        }
    }

    /// No right available
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_color(&self, color: PieceColor) -> SideRights {
        match color {
            PieceColor::White => self.white,
            PieceColor::Black => self.black,
        }
    }

    pub fn can_castle(&self, color: PieceColor, side: CastlingSide) -> bool {
        self.for_color(color).get(side)
    }

    pub fn revoke(&mut self, color: PieceColor, side: CastlingSide) {
        let rights = match color {
            PieceColor::White => &mut self.white,
            PieceColor::Black => &mut self.black,
        };
        match side {
            CastlingSide::Kingside => rights.kingside = false,
            CastlingSide::Queenside => rights.queenside = false,
        }
    }

    pub fn revoke_all(&mut self, color: PieceColor) {
        self.revoke(color, CastlingSide::Kingside);
        self.revoke(color, CastlingSide::Queenside);
    }

    /// True when no right in `self` is set that is unset in `earlier`
    pub fn is_subset_of(&self, earlier: &CastlingRights) -> bool {
        [PieceColor::White, PieceColor::Black].iter().all(|&color| {
            [CastlingSide::Kingside, CastlingSide::Queenside]
                .iter()
                .all(|&side| !self.can_castle(color, side) || earlier.can_castle(color, side))
        })
    }
}
