pub mod config;
pub mod engine;
pub mod node;
pub mod rollout;
pub mod search_report;
pub mod selection;

pub use config::EngineConfig;
pub use engine::MctsEngine;
pub use node::{NodeId, SearchNode, SearchTree, ROOT};
pub use rollout::Outcome;
pub use search_report::{MoveStatistics, SearchReport, SelectionReason};
