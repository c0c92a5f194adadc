//! Error types for match configuration and game play

use crate::{MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS};

/// Errors raised while validating a match configuration.
///
/// A match is never constructed from a configuration that produced one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("opponent type must be 'human' or 'computer', got '{0}'")]
    InvalidOpponent(String),

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("the number of rows must be between {} and {}, got {0}", MIN_ROWS, MAX_ROWS)]
    RowsOutOfRange(usize),

    #[error(
        "the number of columns must be between {} and {}, got {0}",
        MIN_COLUMNS,
        MAX_COLUMNS
    )]
    ColumnsOutOfRange(usize),

    #[error("unknown first player '{0}'")]
    InvalidFirstMover(String),

    #[error("in games against a {opponent} opponent the first move must be made by {expected}, got '{first_mover}'")]
    FirstMoverMismatch {
        opponent: &'static str,
        expected: &'static str,
        first_mover: String,
    },

    #[error("difficulty must be 'easy', 'medium' or 'hard', got '{0}'")]
    InvalidDifficulty(String),
}

/// Contract violations raised by the board, the search and the match controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move, column {column} is full")]
    InvalidMove { column: usize },

    #[error("invalid move, column {column} out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("search requested on a board with no legal columns")]
    SearchExhausted,

    #[error("{requested} cannot move now, waiting for {awaiting}")]
    UnexpectedTurn {
        requested: &'static str,
        awaiting: &'static str,
    },

    #[error("the match is over, restart it to keep playing")]
    MatchOver,
}
