use crate::agents::Agent;
use crate::game::othello::OthelloBoard;
use crate::game::position::Position;
use crate::mcts::config::EngineConfig;
use crate::mcts::engine::MctsEngine;
use crate::mcts::search_report::SearchReport;
use crate::Result;

/// Seat driven by the MCTS engine.
pub struct MctsAgent {
    engine: MctsEngine,
}

impl MctsAgent {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            engine: MctsEngine::new(config)?,
        })
    }

    pub fn simulation_count(&self) -> u32 {
        self.engine.config().simulation_count
    }

    /// Tells the engine how many simulations the opposing engine runs.
    pub fn set_opponent_simulation_count(&mut self, count: Option<u32>) {
        self.engine.set_opponent_simulation_count(count);
    }

    pub fn last_report(&self) -> Option<&SearchReport> {
        self.engine.last_report()
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> String {
        let config = self.engine.config();
        match config.time_limit_secs {
            Some(limit) => format!("MCTS AI ({:.1}s)", limit),
            None => format!("MCTS AI ({} sims)", config.simulation_count),
        }
    }

    fn choose_move(&mut self, board: &OthelloBoard) -> Result<Option<Position>> {
        log::info!("{} is thinking...", self.name());
        let mv = self.engine.get_move(board);
        if let Some(mv) = mv {
            log::info!("AI places at {}", mv);
        }
        Ok(mv)
    }
}
