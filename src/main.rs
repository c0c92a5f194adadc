use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::Level;

use std::io::{stdin, stdout, Stdin, Write};

use four_in_a_row::{
    board::{Mark, Outcome},
    config::{Difficulty, MatchConfig, Opponent, Side},
    controller::{MatchController, MatchState},
};

mod display;

/// Play 'Four in a Row' in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opponent type: 'human' or 'computer'
    opponent_type: String,

    /// Number of rows, between 4 and 8
    rows: String,

    /// Number of columns, between 4 and 16
    columns: String,

    /// Who moves first: 'player1' or 'player2' against a human,
    /// 'human' or 'computer' against the computer
    first_player: String,

    /// Search the computer's candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Log to stderr, -v for match events and -vv for every move and search
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = MatchConfig::from_args(
        &args.opponent_type,
        &args.rows,
        &args.columns,
        &args.first_player,
    )
    .context("could not start the game")?;

    let stdin = stdin();

    println!("Welcome to Four in a Row\n");

    let mut controller =
        MatchController::new(config, Difficulty::default())?.with_parallel_search(args.parallel);

    let mut selection = choose_match(&stdin, config.opponent, false)?;
    while let Some(difficulty) = selection {
        controller.set_difficulty(difficulty);
        controller.restart();

        let outcome = play_match(&mut controller, &stdin)?;
        announce(&outcome, config.opponent);

        selection = choose_match(&stdin, config.opponent, true)?;
    }
    Ok(())
}

/// Reads a trimmed, lowercase line from stdin, or `None` once stdin is closed
fn prompt(stdin: &Stdin, question: &str) -> Result<Option<String>> {
    print!("{}", question);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_lowercase()))
}

/// Asks for the next match to play, returning `None` when the player wants to quit
fn choose_match(stdin: &Stdin, opponent: Opponent, replay: bool) -> Result<Option<Difficulty>> {
    loop {
        let answer = match opponent {
            Opponent::Computer => prompt(stdin, "Choose a difficulty (easy/medium/hard) or exit: ")?,
            Opponent::Human if replay => prompt(stdin, "Play again? y/n: ")?,
            Opponent::Human => prompt(stdin, "Start a match? y/n: ")?,
        };
        let answer = match answer {
            Some(answer) => answer,
            None => return Ok(None),
        };

        match (opponent, answer.as_str()) {
            (_, "exit") | (Opponent::Human, "n") | (Opponent::Human, "no") => return Ok(None),
            (Opponent::Human, "y") | (Opponent::Human, "yes") => {
                return Ok(Some(Difficulty::default()))
            }
            (Opponent::Computer, answer) => match answer.parse::<Difficulty>() {
                Ok(difficulty) => return Ok(Some(difficulty)),
                Err(err) => println!("{}", err),
            },
            _ => println!("Unknown answer given"),
        }
    }
}

/// Runs the match loop until the controller reaches a terminal state
fn play_match(controller: &mut MatchController, stdin: &Stdin) -> Result<Outcome> {
    loop {
        let state = *controller.state();
        match state {
            MatchState::AwaitingInput(Side::Computer) => {
                display::draw_board(controller.board(), &[])?;

                let spinner = ProgressBar::new_spinner();
                spinner.set_message("Computer is thinking...");
                spinner.enable_steady_tick(100);
                let column = controller.play_computer_turn()?;
                spinner.finish_and_clear();

                println!("Computer plays column {}\n", column + 1);
            }

            MatchState::AwaitingInput(side) => {
                display::draw_board(controller.board(), &[])?;

                let input = prompt(stdin, &format!("{} move input > ", side))?
                    .ok_or_else(|| anyhow!("input closed during the match"))?;
                let column = match input.parse::<usize>() {
                    Ok(column) if column >= 1 => column - 1,
                    _ => {
                        println!("Invalid number: {}", input);
                        continue;
                    }
                };

                if !controller.board().is_valid_move(column) {
                    println!(
                        "Invalid move, column {} is full or not on the board",
                        column + 1
                    );
                    // try the move again
                    continue;
                }
                controller.submit_column(column)?;
            }

            MatchState::Evaluating => {
                return Err(anyhow!("match stopped while checking the board"));
            }

            // end state
            MatchState::Terminal(outcome) => {
                let board = controller.board();
                display::draw_board(board, &outcome.highlighted_cells(board))?;
                return Ok(outcome);
            }
        }
    }
}

fn announce(outcome: &Outcome, opponent: Opponent) {
    let message = match (outcome.winner(), opponent) {
        (Some(Mark::A), Opponent::Computer) => "You won!",
        (Some(Mark::B), Opponent::Computer) => "Computer won!",
        (Some(Mark::A), Opponent::Human) => "Player 1 wins!",
        (Some(Mark::B), Opponent::Human) => "Player 2 wins!",
        (None, _) => "Draw!",
    };
    println!("{}\n", message);
}
