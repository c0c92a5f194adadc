//! The game board and the rules of play
//!
//! Coordinates are `(row, column)` pairs with row 0 at the top of the board,
//! so a dropped mark settles at the largest empty row of its column.

use anyhow::{anyhow, Result};

use std::fmt;

use crate::{
    config,
    error::{ConfigError, GameError},
    MAX_COLUMNS, MAX_ROWS, WIN_LENGTH,
};

/// A `(row, column)` position on the board
pub type Coord = (usize, usize);

/// The mark a player places on the board
///
/// `A` belongs to player 1 or the human, `B` to player 2 or the computer.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Mark {
    A,
    B,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    pub fn symbol(self) -> char {
        Cell::from(self).symbol()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    MarkA,
    MarkB,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::MarkA => Some(Mark::A),
            Cell::MarkB => Some(Mark::B),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::MarkA => 'X',
            Cell::MarkB => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::MarkA),
            'O' | 'o' => Some(Cell::MarkB),
            _ => None,
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::A => Cell::MarkA,
            Mark::B => Cell::MarkB,
        }
    }
}

/// The four scan directions, in the order windows are visited
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    /// left to right
    Horizontal,
    /// top to bottom
    Vertical,
    /// down and to the right
    Diagonal,
    /// down and to the left
    AntiDiagonal,
}

static DIRECTIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::Diagonal,
    Direction::AntiDiagonal,
];

impl Direction {
    /// `(row, column)` offset between neighbouring cells of a line
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A straight run of `WIN_LENGTH` cells
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Window {
    pub direction: Direction,
    pub cells: [Coord; WIN_LENGTH],
}

impl Window {
    /// The window starting at `start` and heading in `direction`, if it fits on
    /// a `rows` x `columns` board
    fn starting_at(
        direction: Direction,
        start: Coord,
        rows: usize,
        columns: usize,
    ) -> Option<Self> {
        let (dy, dx) = direction.step();
        let reach = WIN_LENGTH as isize - 1;
        let end_row = start.0 as isize + dy * reach;
        let end_column = start.1 as isize + dx * reach;
        if end_row < 0 || end_row >= rows as isize || end_column < 0 || end_column >= columns as isize
        {
            return None;
        }

        let mut cells = [start; WIN_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let i = i as isize;
            *cell = (
                (start.0 as isize + dy * i) as usize,
                (start.1 as isize + dx * i) as usize,
            );
        }
        Some(Self { direction, cells })
    }
}

/// Four equal marks in a line, in the order they lie along the line
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WinningLine {
    pub mark: Mark,
    pub direction: Direction,
    pub cells: [Coord; WIN_LENGTH],
}

/// How a finished game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Win(WinningLine),
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(line) => Some(line.mark),
            Outcome::Draw => None,
        }
    }

    /// Cells to highlight when showing the result: the winning line, or the
    /// whole board for a draw
    pub fn highlighted_cells(&self, board: &Board) -> Vec<Coord> {
        match self {
            Outcome::Win(line) => line.cells.to_vec(),
            Outcome::Draw => board.coordinates().collect(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; MAX_ROWS * MAX_COLUMNS], // cells are stored top-to-bottom, left-to-right with a stride of MAX_COLUMNS
    heights: [usize; MAX_COLUMNS],
    rows: usize,
    columns: usize,
    num_moves: usize,
}

impl Board {
    /// Creates an empty board, rejecting dimensions outside the allowed range
    pub fn new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        config::check_dimensions(rows, columns)?;
        Ok(Self {
            cells: [Cell::Empty; MAX_ROWS * MAX_COLUMNS],
            heights: [0; MAX_COLUMNS],
            rows,
            columns,
            num_moves: 0,
        })
    }

    /// Parses a board from its text form, one string per row from the top,
    /// using `.` for empty cells, `X` for mark A and `O` for mark B
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let columns = lines.first().map_or(0, |line| line.as_ref().chars().count());
        let mut board = Self::new(lines.len(), columns)?;

        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != columns {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    columns
                ));
            }
            for (column, symbol) in line.chars().enumerate() {
                board.cells[Self::index(row, column)] = Cell::from_symbol(symbol)
                    .ok_or_else(|| anyhow!("could not parse '{}' as a cell", symbol))?;
            }
        }

        for column in 0..columns {
            let height = (0..board.rows)
                .rev()
                .take_while(|&row| !board.cell(row, column).is_empty())
                .count();
            if (0..board.rows - height).any(|row| !board.cell(row, column).is_empty()) {
                return Err(anyhow!("column {} has a mark above an empty cell", column));
            }
            board.heights[column] = height;
            board.num_moves += height;
        }
        Ok(board)
    }

    fn index(row: usize, column: usize) -> usize {
        row * MAX_COLUMNS + column
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The number of marks on the board
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells[Self::index(row, column)]
    }

    /// Every coordinate of the board, row by row
    pub fn coordinates(&self) -> impl Iterator<Item = Coord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
    }

    /// Whether a mark can be dropped into `column`
    pub fn is_valid_move(&self, column: usize) -> bool {
        column < self.columns && self.heights[column] < self.rows
    }

    /// Columns whose top cell is empty, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| self.is_valid_move(column))
            .collect()
    }

    /// The row a mark dropped into `column` would settle in
    pub fn drop_row(&self, column: usize) -> Option<usize> {
        if self.is_valid_move(column) {
            Some(self.rows - 1 - self.heights[column])
        } else {
            None
        }
    }

    /// Drops `mark` into `column`, returning where it landed
    pub fn play(&mut self, column: usize, mark: Mark) -> Result<Coord, GameError> {
        if column >= self.columns {
            return Err(GameError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        let row = self.drop_row(column).ok_or(GameError::InvalidMove { column })?;

        self.cells[Self::index(row, column)] = mark.into();
        self.heights[column] += 1;
        self.num_moves += 1;
        Ok((row, column))
    }

    /// Removes the top mark of `column`, exactly reversing the last `play` into it
    pub fn undo(&mut self, column: usize) -> Option<Mark> {
        if column >= self.columns || self.heights[column] == 0 {
            return None;
        }
        let index = Self::index(self.rows - self.heights[column], column);
        let mark = self.cells[index].mark();

        self.cells[index] = Cell::Empty;
        self.heights[column] -= 1;
        self.num_moves -= 1;
        mark
    }

    /// Returns a copy of this board with `mark` dropped into `column`
    pub fn apply(&self, column: usize, mark: Mark) -> Result<Self, GameError> {
        let mut next = *self;
        next.play(column, mark)?;
        Ok(next)
    }

    /// Empties every cell
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; MAX_ROWS * MAX_COLUMNS];
        self.heights = [0; MAX_COLUMNS];
        self.num_moves = 0;
    }

    /// Every window on the board: horizontal, vertical, diagonal then
    /// anti-diagonal, each scanned row by row from the top left
    pub fn windows(&self) -> impl Iterator<Item = Window> {
        let (rows, columns) = (self.rows, self.columns);
        DIRECTIONS.iter().flat_map(move |&direction| {
            (0..rows).flat_map(move |row| {
                (0..columns).filter_map(move |column| {
                    Window::starting_at(direction, (row, column), rows, columns)
                })
            })
        })
    }

    pub fn window_cells(&self, window: &Window) -> [Cell; WIN_LENGTH] {
        let mut cells = [Cell::Empty; WIN_LENGTH];
        for (cell, &(row, column)) in cells.iter_mut().zip(window.cells.iter()) {
            *cell = self.cell(row, column);
        }
        cells
    }

    /// The first line of four equal marks in scan order, if any
    pub fn winner(&self) -> Option<WinningLine> {
        self.windows().find_map(|window| {
            let cells = self.window_cells(&window);
            let mark = cells[0].mark()?;
            if cells.iter().all(|&cell| cell == cells[0]) {
                Some(WinningLine {
                    mark,
                    direction: window.direction,
                    cells: window.cells,
                })
            } else {
                None
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.rows * self.columns
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// The result of the game, or `None` while it is still being played
    pub fn outcome(&self) -> Option<Outcome> {
        match self.winner() {
            Some(line) => Some(Outcome::Win(line)),
            None if self.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.columns)
                .map(|column| self.cell(row, column).symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
