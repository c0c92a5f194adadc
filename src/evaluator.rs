//! Static evaluation of a position from the computer's point of view

use crate::{
    board::{Board, Cell},
    WIN_LENGTH,
};

/// Value of a window filled by one mark
pub const LINE_SCORE: i32 = 100;
/// Value of a window with three of one mark and one empty cell
pub const THREE_SCORE: i32 = 5;
/// Value of a window with two of one mark and two empty cells
pub const TWO_SCORE: i32 = 2;

/// Scores `board` by summing the value of every window
///
/// Positive scores favour mark B (the computer), negative scores mark A.
/// Lines of four count like any other window, so a won position is only
/// `LINE_SCORE` better than its neighbours.
pub fn score(board: &Board) -> i32 {
    board
        .windows()
        .map(|window| score_window(&board.window_cells(&window)))
        .sum()
}

/// Scores a single window, zero whenever both marks are present
pub fn score_window(cells: &[Cell; WIN_LENGTH]) -> i32 {
    let (mut a, mut b, mut empty) = (0, 0, 0);
    for cell in cells.iter() {
        match cell {
            Cell::MarkA => a += 1,
            Cell::MarkB => b += 1,
            Cell::Empty => empty += 1,
        }
    }

    match (b, a, empty) {
        (4, 0, 0) => LINE_SCORE,
        (3, 0, 1) => THREE_SCORE,
        (2, 0, 2) => TWO_SCORE,
        (0, 4, 0) => -LINE_SCORE,
        (0, 3, 1) => -THREE_SCORE,
        (0, 2, 2) => -TWO_SCORE,
        _ => 0,
    }
}
