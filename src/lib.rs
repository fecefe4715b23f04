//! # Othello MCTS
//!
//! Monte Carlo Tree Search engine for Othello (Reversi).
//!
//! ## Features
//!
//! - **Game**: Reversi rules behind a small [`GameState`] trait
//! - **Engine**: UCB1 tree search with heuristic rollouts and corner safety
//! - **Agents**: human, MCTS and random players
//! - **Arena**: single matches and parallel engine-vs-engine series
//!
//! ## Usage
//!
//! ```rust
//! use othello_mcts::{EngineConfig, MctsEngine, OthelloBoard};
//!
//! let mut engine = MctsEngine::new(EngineConfig {
//!     seed: Some(7),
//!     ..EngineConfig::with_simulations(50)
//! })
//! .unwrap();
//! let mv = engine.get_move(&OthelloBoard::new());
//! assert!(mv.is_some());
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Board, players and coordinates
pub mod game;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Static positional knowledge shared by the engine and its rollouts
pub mod strategy;

/// Player types
pub mod agents;

/// Game driver and series runner
pub mod arena;

/// Logger setup for the binary
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use agents::{Agent, HumanAgent, MctsAgent, RandomAgent};
pub use arena::{play_game, play_series, GameRecord, SeriesSettings, SeriesSummary};
pub use game::{GameState, OthelloBoard, Player, Position, BOARD_SIZE};
pub use mcts::{EngineConfig, MctsEngine, SearchReport, SelectionReason};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Othello MCTS library
#[derive(Debug, thiserror::Error)]
pub enum OthelloMctsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Illegal move: {0}")]
    IllegalMove(Position),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OthelloMctsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
