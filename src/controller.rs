//! Turn order and match lifecycle

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

use crate::{
    board::{Board, Outcome},
    config::{Difficulty, MatchConfig, Side},
    error::{ConfigError, GameError},
    search::Minimax,
};

/// Where a match is in its turn cycle
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MatchState {
    /// Waiting for `Side` to choose a column
    AwaitingInput(Side),
    /// A move has just been applied and the board is being checked
    Evaluating,
    Terminal(Outcome),
}

/// Runs matches between two sides on a single board
///
/// The controller owns the live board. Presentation code reads it through
/// [`MatchController::board`] and drives the match with
/// [`MatchController::submit_column`] for human players and
/// [`MatchController::play_computer_turn`] for the computer.
pub struct MatchController {
    config: MatchConfig,
    difficulty: Difficulty,
    parallel_search: bool,
    board: Board,
    state: MatchState,
    // on easy, only the computer's first move of a match is searched
    computer_has_moved: bool,
    rng: StdRng,
}

impl MatchController {
    pub fn new(config: MatchConfig, difficulty: Difficulty) -> Result<Self, ConfigError> {
        Self::with_rng(config, difficulty, StdRng::from_entropy())
    }

    /// Creates a controller whose random moves are reproducible
    pub fn with_seed(
        config: MatchConfig,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: MatchConfig,
        difficulty: Difficulty,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        // re-check in case the configuration was assembled by hand
        let config = MatchConfig::new(
            config.opponent,
            config.rows,
            config.columns,
            config.first_mover,
        )?;
        Ok(Self {
            config,
            difficulty,
            parallel_search: false,
            board: Board::new(config.rows, config.columns)?,
            state: MatchState::AwaitingInput(config.first_mover),
            computer_has_moved: false,
            rng,
        })
    }

    /// Runs the computer's searches across all cores
    pub fn with_parallel_search(mut self, parallel: bool) -> Self {
        self.parallel_search = parallel;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the computer's strength, taking effect from its next move
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The side to move, or `None` once the match is over
    pub fn current_turn(&self) -> Option<Side> {
        match self.state {
            MatchState::AwaitingInput(side) => Some(side),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            MatchState::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.current_turn() == Some(Side::Computer)
    }

    pub fn computer_has_moved(&self) -> bool {
        self.computer_has_moved
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        self.board.legal_columns()
    }

    /// Plays a human player's move into `column`
    pub fn submit_column(&mut self, column: usize) -> Result<&MatchState, GameError> {
        let side = self.awaiting()?;
        if side == Side::Computer {
            return Err(GameError::UnexpectedTurn {
                requested: "a human player",
                awaiting: side.name(),
            });
        }

        self.apply_move(side, column)?;
        Ok(&self.state)
    }

    /// Chooses and plays the computer's move, returning its column
    pub fn play_computer_turn(&mut self) -> Result<usize, GameError> {
        let side = self.awaiting()?;
        if side != Side::Computer {
            return Err(GameError::UnexpectedTurn {
                requested: "the computer",
                awaiting: side.name(),
            });
        }

        let column = self.choose_computer_column()?;
        self.apply_move(side, column)?;
        self.computer_has_moved = true;
        Ok(column)
    }

    fn choose_computer_column(&mut self) -> Result<usize, GameError> {
        match self.difficulty {
            Difficulty::Easy if self.computer_has_moved => self
                .board
                .legal_columns()
                .choose(&mut self.rng)
                .copied()
                .ok_or(GameError::SearchExhausted),
            difficulty => Minimax::new(self.board, difficulty.search_depth())
                .with_parallel(self.parallel_search)
                .find_best_move(),
        }
    }

    fn awaiting(&self) -> Result<Side, GameError> {
        match self.state {
            MatchState::AwaitingInput(side) => Ok(side),
            MatchState::Terminal(_) => Err(GameError::MatchOver),
            MatchState::Evaluating => Err(GameError::UnexpectedTurn {
                requested: "a move",
                awaiting: "the board check",
            }),
        }
    }

    fn apply_move(&mut self, side: Side, column: usize) -> Result<(), GameError> {
        let (row, column) = self.board.play(column, side.mark())?;
        debug!(side = side.name(), row, column, "move applied");

        self.state = MatchState::Evaluating;
        self.evaluate(side);
        Ok(())
    }

    fn evaluate(&mut self, mover: Side) {
        if self.state != MatchState::Evaluating {
            return;
        }

        self.state = match self.board.outcome() {
            Some(outcome) => {
                info!(?outcome, moves = self.board.num_moves(), "match finished");
                MatchState::Terminal(outcome)
            }
            None => MatchState::AwaitingInput(mover.opponent()),
        };
    }

    /// Empties the board and hands the first move back to the configured first mover
    pub fn restart(&mut self) {
        self.board.reset();
        self.computer_has_moved = false;
        self.state = MatchState::AwaitingInput(self.config.first_mover);
        info!(
            first_mover = self.config.first_mover.name(),
            difficulty = %self.difficulty,
            "match restarted"
        );
    }
}
