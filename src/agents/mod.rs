//! Player types that can sit at the board: a human at the terminal, the MCTS
//! engine, or a uniform random mover.

pub mod human;
pub mod mcts_agent;
pub mod random;

pub use human::HumanAgent;
pub use mcts_agent::MctsAgent;
pub use random::RandomAgent;

use crate::game::othello::OthelloBoard;
use crate::game::position::Position;
use crate::Result;

pub trait Agent {
    fn name(&self) -> String;

    /// Move for the side to move on `board`; `Ok(None)` when it has to pass.
    fn choose_move(&mut self, board: &OthelloBoard) -> Result<Option<Position>>;
}
