use crate::agents::Agent;
use crate::game::game_state::GameState;
use crate::game::othello::OthelloBoard;
use crate::game::position::Position;
use crate::{OthelloMctsError, Result};
use std::io::{self, BufRead, Write};

/// Reads moves typed at a terminal (or any line-based input).
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl HumanAgent<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(OthelloMctsError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a move",
            )));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> String {
        "Human".to_string()
    }

    fn choose_move(&mut self, board: &OthelloBoard) -> Result<Option<Position>> {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            writeln!(self.output, "No valid moves available.")?;
            return Ok(None);
        }

        let listed: Vec<String> = legal_moves.iter().map(Position::to_string).collect();
        writeln!(self.output, "Valid moves: {}", listed.join(", "))?;

        loop {
            write!(self.output, "Enter your move (e.g. d3): ")?;
            self.output.flush()?;

            let line = self.read_line()?;
            match line.parse::<Position>() {
                Ok(mv) if legal_moves.contains(&mv) => return Ok(Some(mv)),
                Ok(mv) => writeln!(self.output, "{} is not a valid move. Please try again.", mv)?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }
}
