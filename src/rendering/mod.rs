//! Rendering module - terminal drawing of the board
//!
//! - `board` - text board with highlights, last move and clocks

pub mod board;

pub use board::{piece_glyph, render_board, BoardView};
