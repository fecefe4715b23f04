use clap::Parser;
use std::path::PathBuf;

use othello_mcts::agents::{Agent, HumanAgent, MctsAgent, RandomAgent};
use othello_mcts::arena::{play_game, play_series, SeriesSettings};
use othello_mcts::game::{OthelloBoard, Position};
use othello_mcts::logging::setup_logging;
use othello_mcts::mcts::EngineConfig;
use othello_mcts::{OthelloMctsError, Result};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerKind {
    Human,
    Mcts,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "othello_mcts", version, about)]
struct Config {
    /// Who plays Black
    #[arg(long, value_enum, default_value = "human")]
    black: PlayerKind,

    /// Who plays White
    #[arg(long, value_enum, default_value = "mcts")]
    white: PlayerKind,

    /// Simulations per move for a Black engine
    #[arg(long)]
    black_sims: Option<u32>,

    /// Simulations per move for a White engine
    #[arg(long)]
    white_sims: Option<u32>,

    /// UCB1 exploration weight
    #[arg(short = 'c', long)]
    exploration_weight: Option<f64>,

    /// Seconds per move; replaces the simulation count
    #[arg(short = 't', long)]
    time_limit: Option<f64>,

    /// Seed for every random player (White gets seed + 1)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON engine configuration used as the base for both engines
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of engine-vs-engine games to play in parallel
    #[arg(short = 'g', long, default_value_t = 1)]
    games: usize,

    /// Write rotating log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the JSON search report after every engine move
    #[arg(long, default_value_t = false)]
    report: bool,
}

impl Config {
    fn base_engine_config(&self) -> Result<EngineConfig> {
        let mut base = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(weight) = self.exploration_weight {
            base.exploration_weight = weight;
        }
        if self.time_limit.is_some() {
            base.time_limit_secs = self.time_limit;
        }
        Ok(base)
    }

    /// Per-colour engine configs; two engines learn each other's budget.
    fn engine_configs(&self) -> Result<(EngineConfig, EngineConfig)> {
        let base = self.base_engine_config()?;
        let mut black = base.clone();
        let mut white = base;
        if let Some(sims) = self.black_sims {
            black.simulation_count = sims;
        }
        if let Some(sims) = self.white_sims {
            white.simulation_count = sims;
        }
        if let Some(seed) = self.seed {
            black.seed = Some(seed);
            white.seed = Some(seed.wrapping_add(1));
        }
        if self.black == PlayerKind::Mcts && self.white == PlayerKind::Mcts {
            black.opponent_simulation_count = Some(white.simulation_count);
            white.opponent_simulation_count = Some(black.simulation_count);
        }
        Ok((black, white))
    }
}

/// Engine seat that prints its search report after each move.
struct ReportingAgent(MctsAgent);

impl Agent for ReportingAgent {
    fn name(&self) -> String {
        self.0.name()
    }

    fn choose_move(&mut self, board: &OthelloBoard) -> Result<Option<Position>> {
        let mv = self.0.choose_move(board)?;
        if let Some(report) = self.0.last_report() {
            println!("{}", report.to_json()?);
        }
        Ok(mv)
    }
}

fn build_agent(kind: PlayerKind, config: EngineConfig, report: bool) -> Result<Box<dyn Agent>> {
    Ok(match kind {
        PlayerKind::Human => Box::new(HumanAgent::stdio()),
        PlayerKind::Random => Box::new(RandomAgent::new(config.seed)),
        PlayerKind::Mcts if report => Box::new(ReportingAgent(MctsAgent::new(config)?)),
        PlayerKind::Mcts => Box::new(MctsAgent::new(config)?),
    })
}

fn main() -> Result<()> {
    let config = Config::parse();
    let _logger = setup_logging(config.log_dir.as_deref(), "info")?;

    let (black_config, white_config) = config.engine_configs()?;

    if config.games > 1 {
        if config.black != PlayerKind::Mcts || config.white != PlayerKind::Mcts {
            return Err(OthelloMctsError::InvalidConfig(
                "a series of games needs two mcts players".to_string(),
            ));
        }
        let settings = SeriesSettings {
            base_seed: config.seed,
            ..SeriesSettings::new(black_config, white_config)
        };
        let summary = play_series(&settings, config.games)?;
        println!(
            "Black wins: {}, White wins: {}, Draws: {}, Unfinished: {}",
            summary.black_wins, summary.white_wins, summary.draws, summary.unfinished
        );
        return Ok(());
    }

    let mut black = build_agent(config.black, black_config, config.report)?;
    let mut white = build_agent(config.white, white_config, config.report)?;
    log::info!("{} (Black) vs {} (White)", black.name(), white.name());

    let record = play_game(OthelloBoard::new(), black.as_mut(), white.as_mut(), true)?;
    println!("{}", record.summary());
    Ok(())
}
