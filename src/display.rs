use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use four_in_a_row::board::{Board, Cell, Coord};

/// Draws `board` to stdout, top row first, with `highlight` cells on a light background
pub fn draw_board(board: &Board, highlight: &[Coord]) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (1..=board.columns())
        .map(|column| format!("{:^3}", column))
        .collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let cell = board.cell(row, column);
            let background = if highlight.contains(&(row, column)) {
                Color::Grey
            } else {
                Color::DarkBlue
            };

            stdout.queue(PrintStyledContent(
                style(" O ")
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(match cell {
                        Cell::MarkA => Color::Red,
                        Cell::MarkB => Color::Yellow,
                        Cell::Empty => background,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
