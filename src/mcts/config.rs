//! Engine configuration
//!
//! Every knob is fixed at construction and checked by [`EngineConfig::validate`]
//! so a misconfigured engine fails before it searches anything.

use crate::{OthelloMctsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Rollouts longer than this many plies are scored as draws.
pub const DEFAULT_ROLLOUT_PLY_CAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight of the exploration term in UCB1
    /// Default: 1.0
    pub exploration_weight: f64,

    /// Simulations per move when no time limit is set
    /// Default: 1000
    pub simulation_count: u32,

    /// Wall-clock budget per move in seconds; overrides `simulation_count`
    pub time_limit_secs: Option<f64>,

    /// Budget hint for the opposing engine. A larger own budget counts as a
    /// simulation-count advantage.
    pub opponent_simulation_count: Option<u32>,

    /// Master switch for the advantage-gated heuristics
    /// Default: true
    pub advantage_heuristics: bool,

    /// Hard cap on plies per rollout
    /// Default: 200
    pub rollout_ply_cap: usize,

    /// Seed for the engine's random generator; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exploration_weight: 1.0,
            simulation_count: 1000,
            time_limit_secs: None,
            opponent_simulation_count: None,
            advantage_heuristics: true,
            rollout_ply_cap: DEFAULT_ROLLOUT_PLY_CAP,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_simulations(simulation_count: u32) -> Self {
        Self {
            simulation_count,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(OthelloMctsError::InvalidConfig(format!(
                "exploration weight must be a non-negative number, got {}",
                self.exploration_weight
            )));
        }

        match self.time_limit_secs {
            Some(limit) if !limit.is_finite() || limit <= 0.0 => {
                return Err(OthelloMctsError::InvalidConfig(format!(
                    "time limit must be a positive number of seconds, got {}",
                    limit
                )));
            }
            None if self.simulation_count == 0 => {
                return Err(OthelloMctsError::InvalidConfig(
                    "simulation count must be positive when no time limit is set".to_string(),
                ));
            }
            _ => {}
        }

        if self.rollout_ply_cap == 0 {
            return Err(OthelloMctsError::InvalidConfig(
                "rollout ply cap must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs_f64)
    }

    /// Whether this engine's budget beats the opponent's hinted budget.
    /// Without a hint there is no advantage.
    pub fn has_simulation_advantage(&self) -> bool {
        self.advantage_heuristics
            && self
                .opponent_simulation_count
                .is_some_and(|opponent| self.simulation_count > opponent)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// One-line summary for logging
    pub fn to_config_string(&self) -> String {
        let budget = match self.time_limit_secs {
            Some(limit) => format!("{:.2}s", limit),
            None => format!("{}sims", self.simulation_count),
        };
        format!(
            "budget[{}]_c[{:.2}]_opponent[{}]_cap[{}]",
            budget,
            self.exploration_weight,
            self.opponent_simulation_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            self.rollout_ply_cap
        )
    }
}
