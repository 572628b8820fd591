use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_engine::{GameState, Stone};

/// Draws the board with coloured stones, column numbers counted from 1 on top
pub fn display(state: &GameState) -> Result<()> {
    let board = state.board();
    let mut stdout = stdout();

    let cols: String = (1..=board.width()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for y in 0..board.height() {
        for x in 0..board.width() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(x, y) {
                        Stone::Red => Color::Red,
                        Stone::Yellow => Color::Yellow,
                        Stone::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
