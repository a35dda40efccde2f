//! Board geometry helpers
//!
//! Pure functions over linear square indices. Rows are 1-based rank numbers
//! (row 1 holds a1..h1). Iteration helpers take the viewer's [`Orientation`]
//! into account so callers always walk the board visually, top-left to
//! bottom-right.

use crate::game::types::{Orientation, Square};

/// Rank index of a square (0 = rank 1)
pub fn rank_of(square: Square) -> u8 {
    square.rank()
}

/// File index of a square (0 = file a)
pub fn file_of(square: Square) -> u8 {
    square.file()
}

/// Rebuild a square from rank and file indices
pub fn square_at(rank: u8, file: u8) -> Option<Square> {
    Square::from_rank_file(rank, file)
}

/// a1 is dark, h1 is light
pub fn is_light_square(square: Square) -> bool {
    (file_of(square) + rank_of(square)) % 2 != 0
}

/// End of a rank, seen from White's side (file a is `Left`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankEnd {
    Left,
    Right,
    Both,
}

/// End of a file, seen from White's side (rank 1 is `Bottom`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEnd {
    Bottom,
    Top,
    Both,
}

/// Whether `square` sits at the chosen end(s) of its rank
pub fn is_on_rank_edge(square: Square, end: RankEnd) -> bool {
    match end {
        RankEnd::Left => file_of(square) == 0,
        RankEnd::Right => file_of(square) == 7,
        RankEnd::Both => matches!(file_of(square), 0 | 7),
    }
}

/// Whether `square` sits at the chosen end(s) of its file
pub fn is_on_file_edge(square: Square, end: FileEnd) -> bool {
    match end {
        FileEnd::Bottom => rank_of(square) == 0,
        FileEnd::Top => rank_of(square) == 7,
        FileEnd::Both => matches!(rank_of(square), 0 | 7),
    }
}

/// Square drawn in the left-most column of `row` for this orientation
pub fn first_index_of_row(row: u8, orientation: Orientation) -> Option<Square> {
    let rank = row.checked_sub(1)?;
    match orientation {
        Orientation::White => square_at(rank, 0),
        Orientation::Black => square_at(rank, 7),
    }
}

/// Square drawn in the right-most column of `row` for this orientation
pub fn last_index_of_row(row: u8, orientation: Orientation) -> Option<Square> {
    let rank = row.checked_sub(1)?;
    match orientation {
        Orientation::White => square_at(rank, 7),
        Orientation::Black => square_at(rank, 0),
    }
}

/// Rows from the top of the screen to the bottom
pub fn display_rows(orientation: Orientation) -> impl Iterator<Item = u8> {
    let rows: [u8; 8] = match orientation {
        Orientation::White => [8, 7, 6, 5, 4, 3, 2, 1],
        Orientation::Black => [1, 2, 3, 4, 5, 6, 7, 8],
    };
    rows.into_iter()
}

/// Squares of one row, left to right on screen
pub fn row_squares(row: u8, orientation: Orientation) -> Vec<Square> {
    let (Some(first), Some(last)) = (
        first_index_of_row(row, orientation),
        last_index_of_row(row, orientation),
    ) else {
        return Vec::new();
    };

    let (first, last) = (first.index(), last.index());
    let indices: Vec<u8> = if first <= last {
        (first..=last).collect()
    } else {
        (last..=first).rev().collect()
    };
    indices.into_iter().filter_map(Square::new).collect()
}

/// All 64 squares in on-screen order
pub fn display_order(orientation: Orientation) -> Vec<Square> {
    display_rows(orientation)
        .flat_map(|row| row_squares(row, orientation))
        .collect()
}
