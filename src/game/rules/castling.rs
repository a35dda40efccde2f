//! Castling geometry and rights bookkeeping
//!
//! Only standard-chess starting squares are known here. The legality oracle
//! decides whether a castle is allowed; this module only knows where the king
//! and rook end up and which rights a move gives up.

use crate::game::types::{CastlingSide, PieceColor, Square};

const fn square(index: u8) -> Square {
    match Square::new(index) {
        Some(square) => square,
        None => panic!("square index out of range"),
    }
}

const WHITE_KING_START: Square = square(4);
const BLACK_KING_START: Square = square(60);

/// Rook starting squares, indexed by color then `[kingside, queenside]`
const ROOK_STARTS: [[Square; 2]; 2] = [[square(7), square(0)], [square(63), square(56)]];

/// Castled rook squares, same layout as [`ROOK_STARTS`]
const ROOK_CASTLED: [[Square; 2]; 2] = [[square(5), square(3)], [square(61), square(59)]];

fn table_index(color: PieceColor, side: CastlingSide) -> (usize, usize) {
    let color = match color {
        PieceColor::White => 0,
        PieceColor::Black => 1,
    };
    let side = match side {
        CastlingSide::Kingside => 0,
        CastlingSide::Queenside => 1,
    };
    (color, side)
}

/// Starting square of a color's king
pub fn king_starting_square(color: PieceColor) -> Square {
    match color {
        PieceColor::White => WHITE_KING_START,
        PieceColor::Black => BLACK_KING_START,
    }
}

/// Starting square of the rook on `side`
pub fn rook_starting_square(color: PieceColor, side: CastlingSide) -> Square {
    let (color, side) = table_index(color, side);
    ROOK_STARTS[color][side]
}

/// Where the rook lands: two files left of the kingside rook, three files
/// right of the queenside rook
pub fn rook_castled_square(color: PieceColor, side: CastlingSide) -> Square {
    let (color, side) = table_index(color, side);
    ROOK_CASTLED[color][side]
}

/// Castling side of a king move, if it moves exactly two files along its rank
pub fn castling_side(origin: Square, destination: Square) -> Option<CastlingSide> {
    if origin.rank() != destination.rank() {
        return None;
    }
    match i16::from(destination.file()) - i16::from(origin.file()) {
        2 => Some(CastlingSide::Kingside),
        -2 => Some(CastlingSide::Queenside),
        _ => None,
    }
}

/// Which right a rook gives up when it leaves `starting_square`
pub fn rook_side_for_start(color: PieceColor, starting_square: Square) -> Option<CastlingSide> {
    [CastlingSide::Kingside, CastlingSide::Queenside]
        .into_iter()
        .find(|&side| rook_starting_square(color, side) == starting_square)
}
