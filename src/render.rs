use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect3_ai::board::{Board, Cell, Coord, Player};

/// Draws the board with column and row numbers matching the move tokens
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=board.width()).map(|x| format!(" {}", x)).collect();
    stdout.queue(PrintStyledContent(style(format!("  {}\n", cols))))?;

    for y in 0..board.height() {
        stdout.queue(PrintStyledContent(style(format!("{} ", y + 1))))?;
        for x in 0..board.width() {
            let (glyph, colour) = match board.cell(Coord::new(x, y)) {
                Cell::Piece(Player::White) => ("0", Color::White),
                Cell::Piece(Player::Black) => ("1", Color::Red),
                Cell::Empty => (".", Color::DarkBlue),
            };
            stdout.queue(PrintStyledContent(
                style(format!(" {}", glyph))
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(colour),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n".to_string())))?;
    }
    stdout.flush()?;
    Ok(())
}
