//! Standard 8x8 Othello rules: flanking, flipping, forced passes and game end.

use crate::game::game_state::GameState;
use crate::game::player::Player;
use crate::game::position::{Position, BOARD_SIZE};
use crate::{OthelloMctsError, Result};
use std::fmt;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloBoard {
    cells: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
    current: Option<Player>,
    black_count: u32,
    white_count: u32,
}

impl Default for OthelloBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl OthelloBoard {
    /// Standard opening position, Black to move.
    pub fn new() -> Self {
        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Some(Player::White);
        cells[3][4] = Some(Player::Black);
        cells[4][3] = Some(Player::Black);
        cells[4][4] = Some(Player::White);

        Self {
            cells,
            current: Some(Player::Black),
            black_count: 2,
            white_count: 2,
        }
    }

    /// Builds a position from eight rows of eight cells: `B`/`X` for Black,
    /// `W`/`O` for White, `.`/`-` for empty. Whitespace is ignored. If
    /// `to_move` has no legal move the turn goes to the other side, and if
    /// neither can move the position is finished.
    pub fn from_rows(rows: &[&str], to_move: Player) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(OthelloMctsError::Parse(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(OthelloMctsError::Parse(format!(
                    "row {} has {} cells, expected {}",
                    row + 1,
                    symbols.len(),
                    BOARD_SIZE
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                cells[row][col] = match symbol {
                    'B' | 'b' | 'X' | 'x' => Some(Player::Black),
                    'W' | 'w' | 'O' | 'o' => Some(Player::White),
                    '.' | '-' => None,
                    other => {
                        return Err(OthelloMctsError::Parse(format!(
                            "unknown cell '{}' at row {}",
                            other,
                            row + 1
                        )))
                    }
                };
            }
        }

        let count = |player: Player| {
            cells
                .iter()
                .flatten()
                .filter(|cell| **cell == Some(player))
                .count() as u32
        };

        let mut board = Self {
            cells,
            current: None,
            black_count: count(Player::Black),
            white_count: count(Player::White),
        };
        board.hand_turn_to(to_move);
        Ok(board)
    }

    pub fn cell(&self, pos: Position) -> Option<Player> {
        self.cells[pos.row][pos.col]
    }

    /// Disc counts as `(black, white)`.
    pub fn score(&self) -> (u32, u32) {
        (self.black_count, self.white_count)
    }

    pub fn is_valid_move(&self, pos: Position) -> bool {
        match self.current {
            Some(player) => {
                pos.is_on_board()
                    && self.cell(pos).is_none()
                    && !self.captures(pos, player).is_empty()
            }
            None => false,
        }
    }

    /// Places a disc for the side to move and flips every flanked line.
    pub fn play(&mut self, pos: Position) -> Result<()> {
        let player = match self.current {
            Some(player) if self.is_valid_move(pos) => player,
            _ => return Err(OthelloMctsError::IllegalMove(pos)),
        };

        let flipped = self.captures(pos, player);
        self.cells[pos.row][pos.col] = Some(player);
        for square in &flipped {
            self.cells[square.row][square.col] = Some(player);
        }

        let gained = flipped.len() as u32;
        match player {
            Player::Black => {
                self.black_count += 1 + gained;
                self.white_count -= gained;
            }
            Player::White => {
                self.white_count += 1 + gained;
                self.black_count -= gained;
            }
        }

        self.hand_turn_to(player.opponent());
        Ok(())
    }

    /// Opponent discs that `player` would flip by playing at `pos`.
    fn captures(&self, pos: Position, player: Player) -> Vec<Position> {
        let opponent = player.opponent();
        let mut flipped = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut line = Vec::new();
            let mut cursor = pos.offset(dr, dc);
            while let Some(square) = cursor {
                match self.cell(square) {
                    Some(p) if p == opponent => line.push(square),
                    Some(_) => {
                        flipped.append(&mut line);
                        break;
                    }
                    None => break,
                }
                cursor = square.offset(dr, dc);
            }
        }

        flipped
    }

    /// Gives the turn to `next`; if it cannot move the turn returns to the
    /// other side, and if neither can move the game is over.
    fn hand_turn_to(&mut self, next: Player) {
        self.current = Some(next);
        if self.legal_moves().is_empty() {
            self.current = Some(next.opponent());
            if self.legal_moves().is_empty() {
                self.current = None;
            }
        }
    }
}

impl GameState for OthelloBoard {
    fn legal_moves(&self) -> Vec<Position> {
        if self.current.is_none() {
            return Vec::new();
        }
        Position::all().filter(|pos| self.is_valid_move(*pos)).collect()
    }

    fn apply(&mut self, mv: Position) {
        if let Err(e) = self.play(mv) {
            log::warn!("Ignoring move on board: {}", e);
        }
    }

    fn is_terminal(&self) -> bool {
        self.current.is_none()
            || self.black_count == 0
            || self.white_count == 0
            || (self.black_count + self.white_count) as usize == BOARD_SIZE * BOARD_SIZE
    }

    fn winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        match self.black_count.cmp(&self.white_count) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn current_player(&self) -> Option<Player> {
        self.current
    }

    fn pass(&mut self) {
        if let Some(player) = self.current {
            self.current = Some(player.opponent());
            if self.legal_moves().is_empty() {
                self.current = None;
            }
        }
    }
}

impl fmt::Display for OthelloBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", row + 1)?;
            for cell in cells {
                let symbol = match cell {
                    Some(Player::Black) => '●',
                    Some(Player::White) => '○',
                    None => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f, " {}", row + 1)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(
            f,
            "Black (●): {}, White (○): {}",
            self.black_count, self.white_count
        )
    }
}
