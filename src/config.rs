//! Match configuration and its validation
//!
//! Everything here is checked before a match is constructed, so the rest of
//! the crate can assume a well formed configuration.

use std::fmt;
use std::str::FromStr;

use crate::{board::Mark, error::ConfigError, MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS};

/// Who the first player is up against
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Opponent {
    Human,
    Computer,
}

impl Opponent {
    pub fn name(self) -> &'static str {
        match self {
            Opponent::Human => "human",
            Opponent::Computer => "computer",
        }
    }
}

impl FromStr for Opponent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Opponent::Human),
            "computer" => Ok(Opponent::Computer),
            _ => Err(ConfigError::InvalidOpponent(s.to_string())),
        }
    }
}

/// A participant in a match
///
/// `Player1` and `Human` always play mark A, `Player2` and `Computer` mark B,
/// whoever moves first.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Side {
    Player1,
    Player2,
    Human,
    Computer,
}

impl Side {
    pub fn mark(self) -> Mark {
        match self {
            Side::Player1 | Side::Human => Mark::A,
            Side::Player2 | Side::Computer => Mark::B,
        }
    }

    /// The side that moves after this one
    pub fn opponent(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// The kind of opponent this side belongs to a match against
    pub fn match_type(self) -> Opponent {
        match self {
            Side::Player1 | Side::Player2 => Opponent::Human,
            Side::Human | Side::Computer => Opponent::Computer,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Player1 => "player1",
            Side::Player2 => "player2",
            Side::Human => "human",
            Side::Computer => "computer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player1 => write!(f, "Player 1"),
            Side::Player2 => write!(f, "Player 2"),
            Side::Human => write!(f, "Human"),
            Side::Computer => write!(f, "Computer"),
        }
    }
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player1" => Ok(Side::Player1),
            "player2" => Ok(Side::Player2),
            "human" => Ok(Side::Human),
            "computer" => Ok(Side::Computer),
            _ => Err(ConfigError::InvalidFirstMover(s.to_string())),
        }
    }
}

/// Strength of the computer opponent
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    /// Scores its first move without lookahead, then plays at random
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies searched below each of the computer's candidate moves
    pub fn search_depth(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Checks board dimensions against the allowed range
pub fn check_dimensions(rows: usize, columns: usize) -> Result<(), ConfigError> {
    if !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
        return Err(ConfigError::RowsOutOfRange(rows));
    }
    if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
        return Err(ConfigError::ColumnsOutOfRange(columns));
    }
    Ok(())
}

/// The settings a match is started with
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MatchConfig {
    pub opponent: Opponent,
    pub rows: usize,
    pub columns: usize,
    pub first_mover: Side,
}

impl MatchConfig {
    pub fn new(
        opponent: Opponent,
        rows: usize,
        columns: usize,
        first_mover: Side,
    ) -> Result<Self, ConfigError> {
        check_dimensions(rows, columns)?;
        if first_mover.match_type() != opponent {
            let expected = match opponent {
                Opponent::Human => "'player1' or 'player2'",
                Opponent::Computer => "'human' or 'computer'",
            };
            return Err(ConfigError::FirstMoverMismatch {
                opponent: opponent.name(),
                expected,
                first_mover: first_mover.name().to_string(),
            });
        }

        Ok(Self {
            opponent,
            rows,
            columns,
            first_mover,
        })
    }

    /// Builds a configuration from command line style text arguments,
    /// checking the opponent, then the dimensions, then the first mover
    pub fn from_args(
        opponent: &str,
        rows: &str,
        columns: &str,
        first_mover: &str,
    ) -> Result<Self, ConfigError> {
        let opponent = opponent.parse::<Opponent>()?;
        let rows = parse_number("rows", rows)?;
        let columns = parse_number("columns", columns)?;
        check_dimensions(rows, columns)?;
        let first_mover = first_mover.parse::<Side>()?;

        Self::new(opponent, rows, columns, first_mover)
    }

    /// The sides owning mark A and mark B
    pub fn sides(&self) -> (Side, Side) {
        match self.opponent {
            Opponent::Human => (Side::Player1, Side::Player2),
            Opponent::Computer => (Side::Human, Side::Computer),
        }
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
