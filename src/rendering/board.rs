//! Text board
//!
//! Draws the position in on-screen order for the viewer's orientation. Each
//! square is three characters wide; the middle one is the piece (uppercase for
//! White, lowercase for Black) or the square's shade, the outer two carry
//! markers:
//!
//! - `[x]` selected origin
//! - `(x)` last move
//! - ` * ` / `*x*` legal destination

use crate::game::board_utils::{
    display_order, display_rows, file_of, is_light_square, is_on_file_edge, is_on_rank_edge,
    rank_of, row_squares, FileEnd, RankEnd,
};
use crate::game::engine::BoardEngine;
use crate::game::resources::{format_clock, ClockState, LegalHighlights, Position};
use crate::game::types::{LastMove, Orientation, PieceColor, PieceRecord, PieceType, Square};
use crate::networking::{LegalityOracle, MoveTransport};
use std::fmt::Write;

/// Everything the board drawing needs, borrowed from the engine
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub position: &'a Position,
    pub orientation: Orientation,
    pub highlights: Option<&'a LegalHighlights>,
    pub selected: Option<Square>,
    pub last_move: Option<LastMove>,
    pub clocks: Option<&'a ClockState>,
}

impl<'a> BoardView<'a> {
    pub fn new(position: &'a Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            highlights: None,
            selected: None,
            last_move: None,
            clocks: None,
        }
    }

    pub fn of<O: LegalityOracle, T: MoveTransport>(engine: &'a BoardEngine<O, T>) -> Self {
        Self {
            position: engine.position(),
            orientation: engine.orientation(),
            highlights: Some(engine.highlights()),
            selected: engine.selected_origin(),
            last_move: engine.last_move(),
            clocks: engine.clocks(),
        }
    }
}

/// FEN letter of a piece
pub fn piece_glyph(piece: &PieceRecord) -> char {
    let letter = match piece.piece_type {
        PieceType::King => 'k',
        PieceType::Queen => 'q',
        PieceType::Rook => 'r',
        PieceType::Bishop => 'b',
        PieceType::Knight => 'n',
        PieceType::Pawn => 'p',
    };
    match piece.piece_color {
        PieceColor::White => letter.to_ascii_uppercase(),
        PieceColor::Black => letter,
    }
}

pub fn render_board(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    let files = file_labels(view.orientation);

    // Rank numbers go next to whichever file edge the viewer sees on each side
    let (left, right) = match view.orientation {
        Orientation::White => (RankEnd::Left, RankEnd::Right),
        Orientation::Black => (RankEnd::Right, RankEnd::Left),
    };

    let _ = writeln!(out, "  {}", files);
    for row in display_rows(view.orientation) {
        for square in row_squares(row, view.orientation) {
            if is_on_rank_edge(square, left) {
                let _ = write!(out, "{} ", rank_of(square) + 1);
            }
            out.push_str(&render_square(view, square));
            if is_on_rank_edge(square, right) {
                let _ = writeln!(out, " {}", rank_of(square) + 1);
            }
        }
    }
    let _ = writeln!(out, "  {}", files);

    if let Some(clocks) = view.clocks {
        let _ = writeln!(
            out,
            "White {}  Black {}",
            format_clock(clocks.white_seconds),
            format_clock(clocks.black_seconds)
        );
    }
    out
}

fn file_labels(orientation: Orientation) -> String {
    display_order(orientation)
        .into_iter()
        .filter(|&square| is_on_file_edge(square, FileEnd::Bottom))
        .map(|square| format!(" {} ", char::from(b'a' + file_of(square))))
        .collect()
}

fn render_square(view: &BoardView<'_>, square: Square) -> String {
    let piece = view.position.piece_at(square);
    let center = match piece {
        Some(piece) => piece_glyph(piece),
        None if is_light_square(square) => ' ',
        None => '.',
    };

    let is_last_move = view
        .last_move
        .is_some_and(|last| last.from == square || last.to == square);
    let is_destination = view
        .highlights
        .is_some_and(|highlights| highlights.contains(square));

    let (left, right) = if view.selected == Some(square) {
        ('[', ']')
    } else if is_destination {
        ('*', '*')
    } else if is_last_move {
        ('(', ')')
    } else {
        (' ', ' ')
    };

    if is_destination && piece.is_none() {
        return " * ".to_string();
    }
    format!("{left}{center}{right}")
}
