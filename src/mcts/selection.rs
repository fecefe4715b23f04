//! Final move choice from a finished search tree.
//!
//! Two rules are available:
//! - most visited root child (standard, robust against lucky win rates)
//! - strategic blend of visit share, win rate and positional weight, used when
//!   the engine out-budgets its opponent and can afford to trust the table

use crate::game::position::Position;
use crate::mcts::node::{SearchTree, ROOT};
use crate::strategy::position_weights::position_weight;

/// Share of the strategic score given to the normalised visit count
pub const VISIT_SHARE: f64 = 0.3;
/// Share given to the raw win rate
pub const WIN_RATE_SHARE: f64 = 0.3;
/// Share given to the positional weight
pub const POSITION_SHARE: f64 = 0.4;
/// Positional weights are divided by this before blending
pub const POSITION_NORMALIZER: f64 = 100.0;
/// Subtracted from the positional term of moves the search never expanded,
/// keeping them below any expanded move on the same square
pub const UNEXPLORED_PENALTY: f64 = 0.1;

/// Root child with the most visits; the earliest child wins ties.
pub fn most_visited<G>(tree: &SearchTree<G>) -> Option<Position> {
    let mut best: Option<(Position, u32)> = None;
    for child in tree.children(ROOT) {
        let Some(mv) = child.incoming_move else {
            continue;
        };
        match best {
            Some((_, visits)) if child.visit_count <= visits => {}
            _ => best = Some((mv, child.visit_count)),
        }
    }
    best.map(|(mv, _)| mv)
}

/// Strategic score of an expanded move.
pub fn strategic_score(visits: u32, total_visits: u32, win_rate: f64, mv: Position) -> f64 {
    let visit_share = if total_visits == 0 {
        0.0
    } else {
        visits as f64 / total_visits as f64
    };
    let positional = position_weight(mv) as f64 / POSITION_NORMALIZER;
    VISIT_SHARE * visit_share + WIN_RATE_SHARE * win_rate + POSITION_SHARE * positional
}

/// Strategic score of a candidate the search never expanded.
pub fn unexplored_score(mv: Position) -> f64 {
    POSITION_SHARE * position_weight(mv) as f64 / POSITION_NORMALIZER - UNEXPLORED_PENALTY
}

/// Best candidate by strategic score; the earliest candidate wins ties.
pub fn select_strategic_move<G>(tree: &SearchTree<G>, candidates: &[Position]) -> Option<Position> {
    let total_visits: u32 = tree.children(ROOT).map(|child| child.visit_count).sum();

    let mut best: Option<(Position, f64)> = None;
    for &mv in candidates {
        let score = match tree
            .children(ROOT)
            .find(|child| child.incoming_move == Some(mv))
        {
            Some(child) => strategic_score(child.visit_count, total_visits, child.win_rate(), mv),
            None => unexplored_score(mv),
        };
        log::trace!("strategic score {} = {:.4}", mv, score);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((mv, score)),
        }
    }
    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::othello::OthelloBoard;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn opening_tree(visits: &[(Position, u32, f64)]) -> SearchTree<OthelloBoard> {
        let mut tree = SearchTree::new(OthelloBoard::new());
        for &(mv, count, wins) in visits {
            let child = tree.expand(ROOT, mv);
            for i in 0..count {
                tree.update(ROOT, 0.5);
                let result = if (i as f64) < wins { 1.0 } else { 0.0 };
                tree.update(child, result);
            }
        }
        tree
    }

    #[test]
    fn test_most_visited_picks_highest_count() {
        let tree = opening_tree(&[(pos("d3"), 3, 1.0), (pos("c4"), 7, 2.0), (pos("f5"), 5, 5.0)]);
        assert_eq!(most_visited(&tree), Some(pos("c4")));
    }

    #[test]
    fn test_most_visited_ties_go_to_first_child() {
        let tree = opening_tree(&[(pos("f5"), 4, 0.0), (pos("d3"), 4, 4.0)]);
        assert_eq!(most_visited(&tree), Some(pos("f5")));
    }

    #[test]
    fn test_most_visited_on_empty_tree() {
        let tree = SearchTree::new(OthelloBoard::new());
        assert_eq!(most_visited(&tree), None);
    }

    #[test]
    fn test_strategic_score_blend() {
        // c3 weighs 15: 0.3 * 0.5 + 0.3 * 0.8 + 0.4 * 0.15
        let score = strategic_score(5, 10, 0.8, pos("c3"));
        assert!((score - 0.45).abs() < 1e-12);
        assert!((strategic_score(0, 0, 0.0, pos("d4")) - 0.012).abs() < 1e-12);
    }

    #[test]
    fn test_unexplored_moves_score_below_expanded_equivalent() {
        let mv = pos("c3");
        assert!(unexplored_score(mv) < strategic_score(0, 1, 0.0, mv));
    }

    #[test]
    fn test_unexplored_negative_squares_stay_below_expanded() {
        // b1 is a C-square weighing -20.
        let mv = pos("b1");
        assert!(unexplored_score(mv) < strategic_score(1, 1000, 0.0, mv));
        for square in Position::all() {
            assert!(
                unexplored_score(square) < strategic_score(0, 1, 0.0, square),
                "{} scores higher unexpanded",
                square
            );
        }
    }

    #[test]
    fn test_strategic_uses_statistics_when_positions_tie() {
        // d3 and f5 both weigh 3, so visits and wins decide.
        let tree = opening_tree(&[(pos("d3"), 6, 3.0), (pos("f5"), 4, 1.0)]);
        let candidates = [pos("d3"), pos("c4"), pos("f5"), pos("e6")];
        assert_eq!(select_strategic_move(&tree, &candidates), Some(pos("d3")));
    }

    #[test]
    fn test_strategic_only_considers_candidates() {
        let tree = opening_tree(&[(pos("d3"), 9, 9.0), (pos("f5"), 1, 0.0)]);
        assert_eq!(select_strategic_move(&tree, &[pos("f5")]), Some(pos("f5")));
        assert_eq!(select_strategic_move(&tree, &[]), None);
    }

    #[test]
    fn test_unexpanded_c_square_ranks_below_losing_expanded_move() {
        // d3 lost every rollout; b1 (-20) was never expanded.
        let tree = opening_tree(&[(pos("d3"), 1, 0.0), (pos("f5"), 999, 0.0)]);
        let candidates = [pos("b1"), pos("d3")];
        assert_eq!(select_strategic_move(&tree, &candidates), Some(pos("d3")));
    }

    #[test]
    fn test_strategic_falls_back_to_table_for_unexpanded() {
        let tree = SearchTree::new(OthelloBoard::new());
        // Nothing expanded: pure positional order, first wins ties.
        let candidates = [pos("d3"), pos("c4"), pos("f5"), pos("e6")];
        assert_eq!(select_strategic_move(&tree, &candidates), Some(pos("d3")));
    }
}
