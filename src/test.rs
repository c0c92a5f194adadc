#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    use crate::board::{Board, Cell, Coord, Direction, Mark, Outcome, WinningLine};
    use crate::config::{Difficulty, MatchConfig, Opponent, Side};
    use crate::controller::{MatchController, MatchState};
    use crate::error::{ConfigError, GameError};
    use crate::evaluator::{self, score_window};
    use crate::search::Minimax;

    // full 6x7 board without any line of four
    const DRAWN_BOARD: [&str; 6] = [
        "XOXOXOX",
        "XOXOXOX",
        "OXOXOXO",
        "OXOXOXO",
        "XOXOXOX",
        "XOXOXOX",
    ];

    fn marks(board: &Board, mark: Mark) -> usize {
        board
            .coordinates()
            .filter(|&(row, column)| board.cell(row, column) == Cell::from(mark))
            .count()
    }

    fn assert_valid_line(board: &Board, line: &WinningLine) {
        let (dy, dx) = line.direction.step();
        for pair in line.cells.windows(2) {
            let ((r0, c0), (r1, c1)) = (pair[0], pair[1]);
            assert_eq!(r1 as isize - r0 as isize, dy);
            assert_eq!(c1 as isize - c0 as isize, dx);
        }
        for &(row, column) in line.cells.iter() {
            assert_eq!(board.cell(row, column), Cell::from(line.mark));
        }
    }

    /// Plays random legal games on random board sizes, checking the board
    /// rules after every move
    #[test]
    pub fn random_playouts() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x4_1d_a7);

        for _ in 0..200 {
            let mut board = Board::new(rng.gen_range(4..=8), rng.gen_range(4..=16))?;
            let mut mark = Mark::A;

            while !board.is_terminal() {
                let legal = board.legal_columns();
                for column in 0..board.columns() {
                    assert_eq!(legal.contains(&column), board.cell(0, column).is_empty());
                }

                let column = *legal.choose(&mut rng).unwrap();
                let row = board.drop_row(column).unwrap();
                let next = board.apply(column, mark)?;

                assert_eq!(next.cell(row, column), Cell::from(mark));
                assert!(row + 1 == board.rows() || !board.cell(row + 1, column).is_empty());
                for (r, c) in board.coordinates().filter(|&coord| coord != (row, column)) {
                    assert_eq!(next.cell(r, c), board.cell(r, c));
                }

                board = next;
                mark = mark.opponent();
            }

            match board.winner() {
                Some(line) => assert_valid_line(&board, &line),
                None => assert!(board.is_full()),
            }
            assert_eq!(board.winner(), board.winner());
            assert_eq!(board.is_full(), board.is_full());
        }
        Ok(())
    }

    #[test]
    pub fn play_and_undo() -> Result<()> {
        let before = Board::from_rows(&["....", "....", ".O..", "XOX."])?;
        let mut board = before;

        assert_eq!(board.play(1, Mark::A)?, (1, 1));
        assert_eq!(board.play(3, Mark::B)?, (3, 3));
        assert_eq!(board.undo(3), Some(Mark::B));
        assert_eq!(board.undo(1), Some(Mark::A));
        assert_eq!(board, before);
        assert_eq!(board.undo(3), None);
        Ok(())
    }

    #[test]
    pub fn invalid_moves() -> Result<()> {
        let board = Board::from_rows(&["X...", "O...", "X...", "O..."])?;

        assert_eq!(board.legal_columns(), vec![1, 2, 3]);
        assert_eq!(board.drop_row(0), None);
        assert_eq!(board.apply(0, Mark::A), Err(GameError::InvalidMove { column: 0 }));
        assert_eq!(
            board.apply(4, Mark::A),
            Err(GameError::ColumnOutOfRange {
                column: 4,
                columns: 4
            })
        );
        assert!(!board.is_valid_move(4));
        Ok(())
    }

    #[test]
    pub fn parse_errors() {
        assert!(Board::from_rows(&["....", "....", "....", "..Z."]).is_err());
        assert!(Board::from_rows(&["....", "....", "....", "..."]).is_err());
        assert!(Board::from_rows(&["....", "....", "....", "...."][..3]).is_err());
        // floating mark
        assert!(Board::from_rows(&["....", "....", "X...", "...."]).is_err());
    }

    #[test]
    pub fn text_form() -> Result<()> {
        let rows = ["....", "....", ".O..", "XOX."];
        let board = Board::from_rows(&rows)?;

        assert_eq!(board.to_string(), rows.join("\n") + "\n");
        assert_eq!(board.num_moves(), 4);
        Ok(())
    }

    #[test]
    pub fn vertical_win() -> Result<()> {
        let mut board = Board::new(6, 7)?;
        for _ in 0..3 {
            board = board.apply(3, Mark::B)?;
            assert_eq!(board.winner(), None);
        }
        board = board.apply(3, Mark::B)?;

        let line = board.winner().unwrap();
        assert_eq!(line.mark, Mark::B);
        assert_eq!(line.direction, Direction::Vertical);
        assert_eq!(line.cells, [(2, 3), (3, 3), (4, 3), (5, 3)]);
        Ok(())
    }

    #[test]
    pub fn horizontal_win() -> Result<()> {
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", ".......", "XXX.OOO",
        ])?;
        assert_eq!(board.winner(), None);

        let board = board.apply(3, Mark::A)?;
        let line = board.winner().unwrap();
        assert_eq!(line.mark, Mark::A);
        assert_eq!(line.direction, Direction::Horizontal);
        assert_eq!(line.cells, [(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert_eq!(board.outcome(), Some(Outcome::Win(line)));
        Ok(())
    }

    #[test]
    pub fn diagonal_wins() -> Result<()> {
        let board = Board::from_rows(&["...O", "..OX", ".OXX", "OXXX"])?;
        assert_eq!(board.winner().unwrap().mark, Mark::B);
        let line = board.winner().unwrap();
        assert_eq!(line.direction, Direction::AntiDiagonal);
        assert_eq!(line.cells, [(0, 3), (1, 2), (2, 1), (3, 0)]);

        let board = Board::from_rows(&["X...", "OX..", "OOX.", "OXOX"])?;
        let line = board.winner().unwrap();
        assert_eq!(line.mark, Mark::A);
        assert_eq!(line.direction, Direction::Diagonal);
        assert_eq!(line.cells, [(0, 0), (1, 1), (2, 2), (3, 3)]);
        Ok(())
    }

    #[test]
    pub fn first_line_in_scan_order() -> Result<()> {
        // a horizontal and a vertical line share the bottom right corner
        let board = Board::from_rows(&["...O", "...O", "...O", "OOOO"])?;
        let line = board.winner().unwrap();
        assert_eq!(line.direction, Direction::Horizontal);
        assert_eq!(line.cells, [(3, 0), (3, 1), (3, 2), (3, 3)]);
        Ok(())
    }

    #[test]
    pub fn full_board_draw() -> Result<()> {
        let board = Board::from_rows(&DRAWN_BOARD)?;

        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
        assert!(board.legal_columns().is_empty());
        assert_eq!(board.outcome(), Some(Outcome::Draw));
        assert_eq!(Outcome::Draw.highlighted_cells(&board).len(), 42);
        assert_eq!(
            Minimax::new(board, 2).find_best_move(),
            Err(GameError::SearchExhausted)
        );
        Ok(())
    }

    #[test]
    pub fn window_scores() {
        use Cell::{Empty as E, MarkA as A, MarkB as B};

        assert_eq!(score_window(&[B, B, B, B]), 100);
        assert_eq!(score_window(&[B, E, B, B]), 5);
        assert_eq!(score_window(&[E, B, B, E]), 2);
        assert_eq!(score_window(&[A, A, A, A]), -100);
        assert_eq!(score_window(&[A, A, E, A]), -5);
        assert_eq!(score_window(&[A, E, E, A]), -2);
        assert_eq!(score_window(&[A, B, B, B]), 0);
        assert_eq!(score_window(&[B, E, E, E]), 0);
        assert_eq!(score_window(&[E, E, E, E]), 0);
    }

    #[test]
    pub fn evaluation() -> Result<()> {
        assert_eq!(evaluator::score(&Board::new(6, 7)?), 0);

        // only the bottom row window holds both marks
        let board = Board::from_rows(&["....", "....", "....", "OO.."])?;
        assert_eq!(evaluator::score(&board), 2);

        let position = [".......", ".......", "...X...", "..OX...", "..OOX..", ".XOXOX."];
        let mirrored: Vec<String> = position
            .iter()
            .map(|row| row.replace('X', "o").replace('O', "X").replace('o', "O"))
            .collect();
        let score = evaluator::score(&Board::from_rows(&position)?);
        assert_ne!(score, 0);
        assert_eq!(evaluator::score(&Board::from_rows(&mirrored)?), -score);
        Ok(())
    }

    #[test]
    pub fn takes_the_win() -> Result<()> {
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", ".....X.", "OOO..XX",
        ])?;
        let mut search = Minimax::new(board, 3);

        assert_eq!(search.find_best_move()?, 3);
        assert!(search.node_count > 0);
        // the search works on its own copy
        assert_eq!(*search, board);
        Ok(())
    }

    #[test]
    pub fn blocks_the_loss() -> Result<()> {
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", "....O..", "XXX.O..",
        ])?;

        assert_eq!(Minimax::new(board, 3).find_best_move()?, 3);
        assert_eq!(Minimax::new(board, 2).find_best_move()?, 3);
        Ok(())
    }

    #[test]
    pub fn search_is_deterministic() -> Result<()> {
        let board = Board::from_rows(&[
            "........", "........", "...X....", "..OO....", "..XOX...", ".XOXOO..",
        ])?;

        for depth in 1..=3 {
            let mut first = Minimax::new(board, depth);
            let mut second = Minimax::new(board, depth);
            let mut parallel = Minimax::new(board, depth).with_parallel(true);

            let column = first.find_best_move()?;
            assert!(board.is_valid_move(column));
            assert_eq!(second.find_best_move()?, column);
            assert_eq!(parallel.find_best_move()?, column);
            assert_eq!(parallel.node_count, first.node_count);
        }
        Ok(())
    }

    #[test]
    pub fn ties_go_to_the_lowest_column() -> Result<()> {
        // every single drop on an empty board scores zero
        assert_eq!(Minimax::new(Board::new(6, 7)?, 0).find_best_move()?, 0);
        Ok(())
    }

    #[test]
    pub fn difficulty_depths() {
        let depths: Vec<usize> = Difficulty::ALL.iter().map(|d| d.search_depth()).collect();
        assert_eq!(depths, vec![0, 2, 3]);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(ConfigError::InvalidDifficulty("expert".to_string()))
        );
    }

    #[test]
    pub fn configuration() -> Result<()> {
        let config = MatchConfig::from_args("computer", "6", "7", "Human")?;
        assert_eq!(config.opponent, Opponent::Computer);
        assert_eq!((config.rows, config.columns), (6, 7));
        assert_eq!(config.first_mover, Side::Human);
        assert_eq!(config.sides(), (Side::Human, Side::Computer));

        let config = MatchConfig::from_args("human", "4", "16", "player2")?;
        assert_eq!(config.sides(), (Side::Player1, Side::Player2));
        Ok(())
    }

    #[test]
    pub fn configuration_errors() {
        let check = |args: [&str; 4]| MatchConfig::from_args(args[0], args[1], args[2], args[3]);

        assert_eq!(
            check(["robot", "6", "7", "human"]),
            Err(ConfigError::InvalidOpponent("robot".to_string()))
        );
        assert_eq!(
            check(["human", "six", "7", "player1"]),
            Err(ConfigError::InvalidNumber {
                field: "rows",
                value: "six".to_string()
            })
        );
        assert_eq!(
            check(["human", "3", "7", "player1"]),
            Err(ConfigError::RowsOutOfRange(3))
        );
        assert_eq!(
            check(["human", "9", "7", "player1"]),
            Err(ConfigError::RowsOutOfRange(9))
        );
        assert_eq!(
            check(["human", "6", "17", "player1"]),
            Err(ConfigError::ColumnsOutOfRange(17))
        );
        assert_eq!(
            check(["human", "6", "7", "nobody"]),
            Err(ConfigError::InvalidFirstMover("nobody".to_string()))
        );
        assert_eq!(
            check(["human", "6", "7", "computer"]),
            Err(ConfigError::FirstMoverMismatch {
                opponent: "human",
                expected: "'player1' or 'player2'",
                first_mover: "computer".to_string()
            })
        );
        assert!(matches!(
            check(["computer", "6", "7", "player1"]),
            Err(ConfigError::FirstMoverMismatch { .. })
        ));
        assert!(Board::new(8, 3).is_err());
    }

    #[test]
    pub fn error_display() {
        assert_eq!(
            ConfigError::RowsOutOfRange(9).to_string(),
            "the number of rows must be between 4 and 8, got 9"
        );
        assert_eq!(
            ConfigError::ColumnsOutOfRange(2).to_string(),
            "the number of columns must be between 4 and 16, got 2"
        );
        assert_eq!(
            GameError::InvalidMove { column: 2 }.to_string(),
            "invalid move, column 2 is full"
        );
    }

    #[test]
    pub fn two_player_match() -> Result<()> {
        let config = MatchConfig::new(Opponent::Human, 4, 4, Side::Player2)?;
        let mut controller = MatchController::new(config, Difficulty::default())?;

        assert_eq!(controller.current_turn(), Some(Side::Player2));
        controller.submit_column(0)?;
        // player 2 owns mark B even when moving first
        assert_eq!(controller.board().cell(3, 0), Cell::MarkB);
        assert_eq!(controller.current_turn(), Some(Side::Player1));
        assert_eq!(
            controller.play_computer_turn(),
            Err(GameError::UnexpectedTurn {
                requested: "the computer",
                awaiting: "player1"
            })
        );

        // a full column is refused without losing the turn
        for column in [1, 0, 0, 0].iter() {
            controller.submit_column(*column)?;
        }
        assert_eq!(
            controller.submit_column(0),
            Err(GameError::InvalidMove { column: 0 })
        );
        assert_eq!(controller.current_turn(), Some(Side::Player1));
        Ok(())
    }

    #[test]
    pub fn match_ends_in_a_draw() -> Result<()> {
        let config = MatchConfig::new(Opponent::Human, 4, 4, Side::Player1)?;
        let mut controller = MatchController::new(config, Difficulty::default())?;

        for &column in [1, 0, 1, 0, 3, 2, 3, 2, 0, 1, 0, 1, 2, 3, 2].iter() {
            controller.submit_column(column)?;
            assert!(controller.outcome().is_none());
        }
        assert_eq!(controller.submit_column(3)?, &MatchState::Terminal(Outcome::Draw));
        assert_eq!(controller.current_turn(), None);
        assert_eq!(controller.submit_column(3), Err(GameError::MatchOver));

        controller.restart();
        assert_eq!(controller.state(), &MatchState::AwaitingInput(Side::Player1));
        assert_eq!(controller.board().num_moves(), 0);
        Ok(())
    }

    #[test]
    pub fn match_reports_the_winning_line() -> Result<()> {
        let config = MatchConfig::new(Opponent::Human, 6, 7, Side::Player1)?;
        let mut controller = MatchController::new(config, Difficulty::default())?;

        for &column in [0, 6, 1, 6, 2, 6].iter() {
            controller.submit_column(column)?;
        }
        controller.submit_column(3)?;

        let outcome = *controller.outcome().unwrap();
        let expected: Vec<Coord> = vec![(5, 0), (5, 1), (5, 2), (5, 3)];
        assert_eq!(outcome.winner(), Some(Mark::A));
        assert_eq!(outcome.highlighted_cells(controller.board()), expected);
        Ok(())
    }

    #[test]
    pub fn easy_computer_searches_once_then_plays_randomly() -> Result<()> {
        let config = MatchConfig::new(Opponent::Computer, 6, 7, Side::Computer)?;
        let mut controller = MatchController::with_seed(config, Difficulty::Easy, 7)?;
        let mut replay = MatchController::with_seed(config, Difficulty::Easy, 7)?;

        assert_eq!(
            controller.submit_column(0),
            Err(GameError::UnexpectedTurn {
                requested: "a human player",
                awaiting: "computer"
            })
        );

        let expected = Minimax::new(*controller.board(), 0).find_best_move()?;
        assert!(!controller.computer_has_moved());
        assert_eq!(controller.play_computer_turn()?, expected);
        assert!(controller.computer_has_moved());
        replay.play_computer_turn()?;

        let mut human_column = 0;
        while controller.outcome().is_none() {
            if controller.is_computer_turn() {
                let before = *controller.board();
                let column = controller.play_computer_turn()?;
                assert!(before.is_valid_move(column));
                assert_eq!(replay.play_computer_turn()?, column);
            } else {
                human_column = (human_column + 1) % 7;
                while !controller.board().is_valid_move(human_column) {
                    human_column = (human_column + 1) % 7;
                }
                controller.submit_column(human_column)?;
                replay.submit_column(human_column)?;
            }
        }

        controller.restart();
        assert!(!controller.computer_has_moved());
        assert!(controller.is_computer_turn());
        Ok(())
    }

    #[test]
    pub fn hard_computer_match() -> Result<()> {
        let config = MatchConfig::new(Opponent::Computer, 6, 7, Side::Human)?;
        let mut controller =
            MatchController::new(config, Difficulty::Hard)?.with_parallel_search(true);

        let mut moves = 0;
        while controller.outcome().is_none() {
            if controller.is_computer_turn() {
                controller.play_computer_turn()?;
            } else {
                let column = controller.legal_columns()[0];
                controller.submit_column(column)?;
            }
            moves += 1;

            let board = controller.board();
            let (a, b) = (marks(board, Mark::A), marks(board, Mark::B));
            assert_eq!(board.num_moves(), moves);
            assert!(a == b || a == b + 1);
        }
        Ok(())
    }
}
