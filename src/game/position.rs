use crate::OthelloMctsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side length of the Othello board.
pub const BOARD_SIZE: usize = 8;

const COLUMNS: &str = "abcdefgh";

/// A board coordinate, 0-based. Displayed in algebraic form (`d3`): column
/// letter followed by the 1-based row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Neighbour one step away in direction `(dr, dc)`, if it stays on the board.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        next.is_on_board().then_some(next)
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = COLUMNS.as_bytes().get(self.col).map_or('?', |&b| b as char);
        write!(f, "{}{}", letter, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = OthelloMctsError;

    /// Accepts `d3`, `3d`, `3 d` and `3,d` (case-insensitive).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .flat_map(char::to_lowercase)
            .collect();

        let letter = cleaned.chars().find(|c| c.is_ascii_alphabetic());
        let digits: String = cleaned.chars().filter(|c| c.is_ascii_digit()).collect();
        let other = cleaned
            .chars()
            .filter(|c| !c.is_ascii_alphanumeric())
            .count();

        let (Some(letter), false, 0) = (letter, digits.is_empty(), other) else {
            return Err(OthelloMctsError::Parse(format!(
                "expected a coordinate like d3, got '{}'",
                input.trim()
            )));
        };
        if cleaned.chars().filter(|c| c.is_ascii_alphabetic()).count() != 1 {
            return Err(OthelloMctsError::Parse(format!(
                "expected exactly one column letter in '{}'",
                input.trim()
            )));
        }

        let col = COLUMNS.find(letter).ok_or_else(|| {
            OthelloMctsError::Parse(format!("column must be one of a-h, got '{}'", letter))
        })?;
        let row: usize = digits
            .parse()
            .map_err(|_| OthelloMctsError::Parse(format!("invalid row '{}'", digits)))?;
        if !(1..=BOARD_SIZE).contains(&row) {
            return Err(OthelloMctsError::Parse(format!(
                "row must be between 1 and {}, got {}",
                BOARD_SIZE, row
            )));
        }

        Ok(Position::new(row - 1, col))
    }
}
