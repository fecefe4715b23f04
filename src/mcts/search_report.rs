use crate::game::position::Position;
use serde::Serialize;

/// Why the engine settled on its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// Only one legal move, no search ran
    OnlyMove,
    /// A corner was available, no search ran
    Corner,
    /// Most visited root child
    MostVisited,
    /// Blend of visits, win rate and position under a simulation advantage
    Strategic,
    /// Replaced by the positionally best move that concedes no corner
    SafetyOverride,
}

/// Statistics of one root child after the search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveStatistics {
    #[serde(rename = "move")]
    pub mv: Position,
    pub visits: u32,
    pub win_score: f64,
    pub win_rate: f64,
    pub position_score: i32,
}

/// Snapshot of one `get_move` call, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub simulations: u32,
    pub elapsed_ms: u64,
    /// Root children, most visited first
    pub moves: Vec<MoveStatistics>,
    pub selected: Option<Position>,
    pub reason: SelectionReason,
}

impl SearchReport {
    /// Report for a decision taken without searching.
    pub fn without_search(selected: Position, reason: SelectionReason) -> Self {
        Self {
            simulations: 0,
            elapsed_ms: 0,
            moves: Vec::new(),
            selected: Some(selected),
            reason,
        }
    }

    pub fn statistics_for(&self, mv: Position) -> Option<&MoveStatistics> {
        self.moves.iter().find(|stats| stats.mv == mv)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_moves_and_reason() {
        let report = SearchReport {
            simulations: 10,
            elapsed_ms: 3,
            moves: vec![MoveStatistics {
                mv: Position::new(2, 3),
                visits: 10,
                win_score: 4.5,
                win_rate: 0.45,
                position_score: 3,
            }],
            selected: Some(Position::new(2, 3)),
            reason: SelectionReason::MostVisited,
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["reason"], "most_visited");
        assert_eq!(json["moves"][0]["move"]["row"], 2);
        assert_eq!(json["moves"][0]["visits"], 10);
        assert!(report.statistics_for(Position::new(2, 3)).is_some());
        assert!(report.statistics_for(Position::new(0, 0)).is_none());
    }

    #[test]
    fn test_report_without_search() {
        let report = SearchReport::without_search(Position::new(0, 0), SelectionReason::Corner);
        assert_eq!(report.simulations, 0);
        assert!(report.moves.is_empty());
        assert_eq!(report.selected, Some(Position::new(0, 0)));
    }
}
