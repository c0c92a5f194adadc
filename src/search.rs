//! The computer opponent's move search

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    board::{Board, Mark},
    error::GameError,
    evaluator,
};

/// A fixed-depth minimax search playing mark B against mark A
///
/// # Notes
/// The search is full width with no pruning, so it visits on the order of
/// `columns ^ (depth + 1)` positions. Leaves and finished positions are both
/// scored with [`evaluator::score`]; a won position gets no bonus beyond the
/// value of its line of four.
///
/// The search owns a copy of the position it was created with and explores it
/// by playing and undoing moves on that copy, so the caller's board is never
/// touched.
#[derive(Clone)]
pub struct Minimax {
    board: Board,
    depth: usize,
    parallel: bool,

    /// The number of positions searched by this `Minimax` so far (for diagnostics only)
    pub node_count: usize,
}

impl Minimax {
    /// Creates a new search from a board, looking `depth` plies past each candidate move
    pub fn new(board: Board, depth: usize) -> Self {
        Self {
            board,
            depth,
            parallel: false,
            node_count: 0,
        }
    }

    /// Searches each candidate move on its own thread
    ///
    /// The chosen move is the same as for a sequential search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Finds the column giving mark B the highest minimax value
    ///
    /// Ties go to the lowest column.
    #[instrument(level = "debug", skip(self), fields(depth = self.depth, parallel = self.parallel))]
    pub fn find_best_move(&mut self) -> Result<usize, GameError> {
        let candidates = self.board.legal_columns();
        if candidates.is_empty() {
            return Err(GameError::SearchExhausted);
        }

        let scores = if self.parallel {
            let this = &*self;
            let results = candidates
                .par_iter()
                .map(|&column| {
                    let mut branch = this.clone();
                    branch.node_count = 0;
                    branch
                        .score_move(column)
                        .map(|score| (column, score, branch.node_count))
                })
                .collect::<Result<Vec<_>, GameError>>()?;

            self.node_count += results.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();
            results
                .into_iter()
                .map(|(column, score, _)| (column, score))
                .collect::<Vec<_>>()
        } else {
            candidates
                .iter()
                .map(|&column| self.score_move(column).map(|score| (column, score)))
                .collect::<Result<Vec<_>, GameError>>()?
        };

        let mut best_score = i32::MIN;
        let mut best_move = candidates[0];
        for (column, score) in scores {
            // strictly greater keeps the earliest of equal moves
            if score > best_score {
                best_score = score;
                best_move = column;
            }
        }

        debug!(
            column = best_move,
            score = best_score,
            nodes = self.node_count,
            "search finished"
        );
        Ok(best_move)
    }

    /// Value of dropping mark B into `column`, searched `depth` plies deep
    fn score_move(&mut self, column: usize) -> Result<i32, GameError> {
        self.board.play(column, Mark::B)?;
        let score = self.minimax(self.depth, false);
        self.board.undo(column);
        Ok(score)
    }

    /// Performs the game tree search on the current position
    ///
    /// Returns the static score once `depth` reaches 0 or the game is over,
    /// otherwise the best value for mark B (`maximizing`) or mark A to move.
    pub fn minimax(&mut self, depth: usize, maximizing: bool) -> i32 {
        self.node_count += 1;

        if depth == 0 || self.board.is_terminal() {
            return evaluator::score(&self.board);
        }

        let (mark, mut best) = if maximizing {
            (Mark::B, i32::MIN)
        } else {
            (Mark::A, i32::MAX)
        };
        for column in 0..self.board.columns() {
            if self.board.play(column, mark).is_err() {
                continue;
            }
            let score = self.minimax(depth - 1, !maximizing);
            self.board.undo(column);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl std::ops::Deref for Minimax {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
