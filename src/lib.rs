//! A game engine and computer opponent for the board game 'Four in a Row'
//!
//! The engine enforces the rules of the game on boards between 4x4 and 8x16,
//! and the computer opponent picks its moves with a fixed-depth minimax
//! search over a window-based static evaluation.
//!
//! # Basic Usage
//!
//! ```
//! use four_in_a_row::{board::{Board, Mark}, search::Minimax};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_rows(&[
//!     ".......",
//!     ".......",
//!     ".......",
//!     ".......",
//!     "XX.....",
//!     "OOO.XX.",
//! ])?;
//! let best_move = Minimax::new(board, 2).find_best_move()?;
//!
//! assert_eq!(best_move, 3);
//! assert!(board.apply(best_move, Mark::B)?.winner().is_some());
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod config;

pub mod board;

pub mod evaluator;

pub mod search;

pub mod controller;

mod test;

/// The number of marks in a line needed to win
pub const WIN_LENGTH: usize = 4;

/// The smallest allowed number of rows
pub const MIN_ROWS: usize = 4;
/// The largest allowed number of rows
pub const MAX_ROWS: usize = 8;

/// The smallest allowed number of columns
pub const MIN_COLUMNS: usize = 4;
/// The largest allowed number of columns
pub const MAX_COLUMNS: usize = 16;

// every allowed board must fit a winning line in each direction
const_assert!(WIN_LENGTH <= MIN_ROWS && WIN_LENGTH <= MIN_COLUMNS);
const_assert!(MIN_ROWS <= MAX_ROWS && MIN_COLUMNS <= MAX_COLUMNS);
