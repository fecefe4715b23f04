//! Running games between agents: a single match or a parallel series.

pub mod game_record;
pub mod match_runner;
pub mod series;

pub use game_record::{GameRecord, MoveRecord};
pub use match_runner::{play_game, MAX_TURNS};
pub use series::{play_series, SeriesSettings, SeriesSummary};
