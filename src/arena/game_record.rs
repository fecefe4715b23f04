//! Record of a finished (or capped) game.

use crate::game::player::Player;
use crate::game::position::Position;
use serde::{Deserialize, Serialize};

/// One turn: a placed disc or a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: usize,
    pub player: Player,
    /// `None` for a pass
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub black_name: String,
    pub white_name: String,
    pub moves: Vec<MoveRecord>,
    pub black_score: u32,
    pub white_score: u32,
    /// `None` for a draw or an unfinished game
    pub winner: Option<Player>,
    pub finished: bool,
}

impl GameRecord {
    pub fn new(black_name: String, white_name: String) -> Self {
        Self {
            black_name,
            white_name,
            moves: Vec::new(),
            black_score: 0,
            white_score: 0,
            winner: None,
            finished: false,
        }
    }

    pub fn record_move(&mut self, player: Player, position: Option<Position>) {
        self.moves.push(MoveRecord {
            turn: self.moves.len(),
            player,
            position,
        });
    }

    pub fn placements(&self) -> usize {
        self.moves.iter().filter(|m| m.position.is_some()).count()
    }

    pub fn passes(&self) -> usize {
        self.moves.len() - self.placements()
    }

    /// Human-readable closing line
    pub fn summary(&self) -> String {
        let result = match (self.finished, self.winner) {
            (false, _) => "Game stopped before the end".to_string(),
            (true, Some(Player::Black)) => format!("Black ({}) wins!", self.black_name),
            (true, Some(Player::White)) => format!("White ({}) wins!", self.white_name),
            (true, None) => "It's a tie!".to_string(),
        };
        format!(
            "{} Final score - Black: {}, White: {}",
            result, self.black_score, self.white_score
        )
    }
}
