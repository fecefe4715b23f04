//! Engine-vs-engine series, one game per rayon task.

use crate::agents::MctsAgent;
use crate::arena::game_record::GameRecord;
use crate::arena::match_runner::play_game;
use crate::game::othello::OthelloBoard;
use crate::game::player::Player;
use crate::mcts::config::EngineConfig;
use crate::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSettings {
    pub black: EngineConfig,
    pub white: EngineConfig,
    /// Game `i` seeds black with `base + 2i` and white with `base + 2i + 1`.
    /// Without a base seed every engine draws from OS entropy.
    pub base_seed: Option<u64>,
}

impl SeriesSettings {
    pub fn new(black: EngineConfig, white: EngineConfig) -> Self {
        Self {
            black,
            white,
            base_seed: None,
        }
    }

    /// Engine configs for game `index`, seeded and told about each other's budget.
    fn configs_for_game(&self, index: usize) -> (EngineConfig, EngineConfig) {
        let mut black = self.black.clone();
        let mut white = self.white.clone();
        if let Some(base) = self.base_seed {
            let offset = 2 * index as u64;
            black.seed = Some(base.wrapping_add(offset));
            white.seed = Some(base.wrapping_add(offset + 1));
        }
        black.opponent_simulation_count = Some(white.simulation_count);
        white.opponent_simulation_count = Some(black.simulation_count);
        (black, white)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    /// Games stopped by the turn cap, counted apart from the rest
    pub unfinished: usize,
    pub black_discs: u32,
    pub white_discs: u32,
}

impl SeriesSummary {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.black_discs += game.black_score;
        self.white_discs += game.white_score;
        match (game.finished, game.winner) {
            (false, _) => self.unfinished += 1,
            (true, Some(Player::Black)) => self.black_wins += 1,
            (true, Some(Player::White)) => self.white_wins += 1,
            (true, None) => self.draws += 1,
        }
    }

    pub fn black_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.black_wins as f64 / self.games as f64
        }
    }
}

fn play_one(settings: &SeriesSettings, index: usize) -> Result<GameRecord> {
    let (black_config, white_config) = settings.configs_for_game(index);
    let mut black = MctsAgent::new(black_config)?;
    let mut white = MctsAgent::new(white_config)?;
    let record = play_game(OthelloBoard::new(), &mut black, &mut white, false)?;
    log::info!(
        "Game {} finished: Black {} - White {}",
        index + 1,
        record.black_score,
        record.white_score
    );
    Ok(record)
}

/// Plays `games` independent games in parallel and tallies the results.
/// The first failing game aborts the series.
pub fn play_series(settings: &SeriesSettings, games: usize) -> Result<SeriesSummary> {
    log::info!(
        "Starting series of {} games: {} vs {} simulations",
        games,
        settings.black.simulation_count,
        settings.white.simulation_count
    );

    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|index| play_one(settings, index))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = SeriesSummary::default();
    for record in &records {
        summary.record(record);
    }
    log::info!(
        "Series over: Black {} wins, White {} wins, {} draws",
        summary.black_wins,
        summary.white_wins,
        summary.draws
    );
    Ok(summary)
}
