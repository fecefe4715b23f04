use crate::agents::Agent;
use crate::game::game_state::GameState;
use crate::game::othello::OthelloBoard;
use crate::game::position::Position;
use crate::Result;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Plays a uniformly random legal move.
pub struct RandomAgent<R = StdRng> {
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn name(&self) -> String {
        "Random AI".to_string()
    }

    fn choose_move(&mut self, board: &OthelloBoard) -> Result<Option<Position>> {
        let mv = board.legal_moves().choose(&mut self.rng).copied();
        if let Some(mv) = mv {
            log::info!("Random AI places at {}", mv);
        }
        Ok(mv)
    }
}
