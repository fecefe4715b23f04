//! Move selection by heuristic Monte Carlo Tree Search.
//!
//! Each call to [`MctsEngine::get_move`] builds a fresh tree from the live game,
//! runs selection / expansion / rollout / backpropagation until the budget is
//! spent, then picks a move from the root statistics. Cheap positional checks
//! run around the search: corners are taken outright, and a move that hands
//! the opponent a corner is swapped for a safer one when possible.

use crate::game::game_state::GameState;
use crate::game::position::Position;
use crate::mcts::config::EngineConfig;
use crate::mcts::node::{NodeId, SearchTree, ROOT};
use crate::mcts::rollout::rollout;
use crate::mcts::search_report::{MoveStatistics, SearchReport, SelectionReason};
use crate::mcts::selection::{most_visited, select_strategic_move};
use crate::strategy::lookahead::{best_positional_move, concedes_corner, without_corner_concessions};
use crate::strategy::position_weights::{is_x_square, position_weight, CORNERS};
use crate::Result;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::cmp::Reverse;
use std::time::Instant;

#[derive(Debug)]
pub struct MctsEngine<R = StdRng> {
    config: EngineConfig,
    rng: R,
    last_report: Option<SearchReport>,
}

impl MctsEngine<StdRng> {
    /// Engine seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> MctsEngine<R> {
    /// Engine drawing every random choice from `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self> {
        config.validate()?;
        log::debug!("MCTS engine configured: {}", config.to_config_string());
        Ok(Self {
            config,
            rng,
            last_report: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_opponent_simulation_count(&mut self, count: Option<u32>) {
        self.config.opponent_simulation_count = count;
    }

    pub fn has_simulation_advantage(&self) -> bool {
        self.config.has_simulation_advantage()
    }

    /// Diagnostics of the last `get_move` call that found a move.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }

    /// Recommends a move for the side to move in `game`, `None` when it has
    /// no legal move.
    pub fn get_move<G: GameState>(&mut self, game: &G) -> Option<Position> {
        let legal_moves = game.legal_moves();
        match legal_moves.as_slice() {
            [] => {
                self.last_report = None;
                return None;
            }
            [only] => return Some(self.decide_without_search(*only, SelectionReason::OnlyMove)),
            _ => {}
        }

        if let Some(corner) = preferred_corner(game, &legal_moves) {
            return Some(self.decide_without_search(corner, SelectionReason::Corner));
        }

        let advantage = self.has_simulation_advantage();
        let candidates = if advantage {
            strategic_candidates(game, &legal_moves)
        } else {
            legal_moves.clone()
        };

        let started = Instant::now();
        let (tree, simulations) = self.run_search(game);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let (picked, mut reason) = if advantage {
            (select_strategic_move(&tree, &candidates), SelectionReason::Strategic)
        } else {
            (most_visited(&tree), SelectionReason::MostVisited)
        };
        let mut chosen = picked
            .or_else(|| best_positional_move(&candidates))
            .unwrap_or(legal_moves[0]);

        if let Some(safer) = safety_override(game, &candidates, chosen) {
            log::debug!("Safety override: {} -> {}", chosen, safer);
            chosen = safer;
            reason = SelectionReason::SafetyOverride;
        }

        let report = build_report(&tree, simulations, elapsed_ms, chosen, reason);
        for stats in &report.moves {
            log::debug!(
                "Move {}: {:.1}/{} = {:.2}, Position Score: {}",
                stats.mv,
                stats.win_score,
                stats.visits,
                stats.win_rate,
                stats.position_score
            );
        }
        log::info!(
            "Selected {} ({:?}) after {} simulations in {} ms",
            chosen,
            reason,
            simulations,
            elapsed_ms
        );
        self.last_report = Some(report);
        Some(chosen)
    }

    /// Builds a tree from a clone of `game` and runs the configured budget of
    /// simulations on it.
    pub fn search<G: GameState>(&mut self, game: &G) -> SearchTree<G> {
        self.run_search(game).0
    }

    /// One selection / expansion / rollout / backpropagation pass.
    pub fn simulate<G: GameState>(&mut self, tree: &mut SearchTree<G>) {
        let exploration_weight = self.config.exploration_weight;
        let mut path: Vec<NodeId> = vec![ROOT];
        let mut current = ROOT;

        while tree.node(current).untried_moves.is_empty() {
            match tree.select_best_child(current, exploration_weight) {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => break,
            }
        }

        let untried = tree.node(current).untried_moves.choose(&mut self.rng).copied();
        if let Some(mv) = untried {
            current = tree.expand(current, mv);
            path.push(current);
        }

        let mut state = tree.node(current).state.clone();
        let outcome = rollout(
            &mut state,
            self.config.rollout_ply_cap,
            self.has_simulation_advantage(),
            &mut self.rng,
        );

        for id in path {
            let result = outcome.score_for(tree.node(id).perspective);
            tree.update(id, result);
        }
    }

    fn run_search<G: GameState>(&mut self, game: &G) -> (SearchTree<G>, u32) {
        let mut tree = SearchTree::new(game.clone());
        let mut simulations = 0u32;

        match self.config.time_limit() {
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    self.simulate(&mut tree);
                    simulations += 1;
                    if Instant::now() >= deadline {
                        break;
                    }
                }
                log::debug!("Performed {} simulations", simulations);
            }
            None => {
                for _ in 0..self.config.simulation_count {
                    self.simulate(&mut tree);
                    simulations += 1;
                }
            }
        }

        (tree, simulations)
    }

    fn decide_without_search(&mut self, mv: Position, reason: SelectionReason) -> Position {
        log::info!("Selected {} ({:?}) without search", mv, reason);
        self.last_report = Some(SearchReport::without_search(mv, reason));
        mv
    }
}

/// First available corner in table order, preferring corners that do not
/// open another corner for the opponent.
fn preferred_corner<G: GameState>(game: &G, legal_moves: &[Position]) -> Option<Position> {
    let corners: Vec<Position> = CORNERS
        .iter()
        .copied()
        .filter(|corner| legal_moves.contains(corner))
        .collect();
    without_corner_concessions(game, &corners).first().copied()
}

/// Candidates trusted under a simulation advantage: X-squares dropped, then
/// corner concessions dropped, each only while something remains.
fn strategic_candidates<G: GameState>(game: &G, legal_moves: &[Position]) -> Vec<Position> {
    let off_x: Vec<Position> = legal_moves
        .iter()
        .copied()
        .filter(|mv| !is_x_square(*mv))
        .collect();
    let candidates = if off_x.is_empty() {
        legal_moves.to_vec()
    } else {
        off_x
    };
    without_corner_concessions(game, &candidates)
}

/// Replacement for a chosen X-square or corner-conceding move: the best
/// positional move among candidates that concede no corner.
///
/// Runs with or without a simulation advantage and also catches non-X moves
/// that concede a corner, so a most-visited edge move can be swapped out.
fn safety_override<G: GameState>(
    game: &G,
    candidates: &[Position],
    chosen: Position,
) -> Option<Position> {
    if !is_x_square(chosen) && !concedes_corner(game, chosen) {
        return None;
    }
    let safer: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|mv| !concedes_corner(game, *mv))
        .collect();
    best_positional_move(&safer).filter(|mv| *mv != chosen)
}

fn build_report<G>(
    tree: &SearchTree<G>,
    simulations: u32,
    elapsed_ms: u64,
    selected: Position,
    reason: SelectionReason,
) -> SearchReport {
    let mut moves: Vec<MoveStatistics> = tree
        .children(ROOT)
        .filter_map(|child| {
            let mv = child.incoming_move?;
            Some(MoveStatistics {
                mv,
                visits: child.visit_count,
                win_score: child.win_score,
                win_rate: child.win_rate(),
                position_score: position_weight(mv),
            })
        })
        .collect();
    moves.sort_by_key(|stats| Reverse(stats.visits));

    SearchReport {
        simulations,
        elapsed_ms,
        moves,
        selected: Some(selected),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::othello::OthelloBoard;
    use crate::game::player::Player;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn seeded(config: EngineConfig, seed: u64) -> MctsEngine<StdRng> {
        MctsEngine::with_rng(config, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn diagonal_trap() -> OthelloBoard {
        OthelloBoard::from_rows(
            &[
                "........",
                "........",
                "..W.....",
                "...B....",
                "....W...",
                "........",
                "........",
                "........",
            ],
            Player::Black,
        )
        .unwrap()
    }

    #[test]
    fn test_visit_conservation() {
        let mut engine = seeded(EngineConfig::with_simulations(50), 1);
        let tree = engine.search(&OthelloBoard::new());
        assert_eq!(tree.root().visit_count, 50);
        let child_visits: u32 = tree.children(ROOT).map(|c| c.visit_count).sum();
        assert_eq!(child_visits, 50);
    }

    #[test]
    fn test_first_simulations_expand_every_root_move() {
        let mut engine = seeded(EngineConfig::with_simulations(4), 2);
        let tree = engine.search(&OthelloBoard::new());
        assert!(tree.root().untried_moves.is_empty());
        assert_eq!(tree.children(ROOT).count(), 4);
        assert!(tree.children(ROOT).all(|child| child.visit_count == 1));
    }

    #[test]
    fn test_backprop_alternates_perspective() {
        let mut engine = seeded(EngineConfig::with_simulations(1), 3);
        let mut tree = SearchTree::new(OthelloBoard::new());
        engine.simulate(&mut tree);

        let root = tree.root();
        let child = tree.children(ROOT).next().unwrap();
        assert_eq!(root.visit_count, 1);
        assert_eq!(child.visit_count, 1);
        assert_eq!(root.perspective, Some(Player::Black));
        assert_eq!(child.perspective, Some(Player::White));
        // Both nodes saw the same rollout: a win on one side is a loss on the other.
        assert!((root.win_score + child.win_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_limit_runs_at_least_once() {
        let config = EngineConfig {
            simulation_count: 0,
            time_limit_secs: Some(1e-9),
            ..Default::default()
        };
        let mut engine = seeded(config, 4);
        let tree = engine.search(&OthelloBoard::new());
        assert!(tree.root().visit_count >= 1);
    }

    #[test]
    fn test_candidates_drop_x_squares_and_concessions() {
        let board = diagonal_trap();
        let legal = board.legal_moves();
        assert_eq!(strategic_candidates(&board, &legal), vec![pos("f6")]);
    }

    #[test]
    fn test_safety_override_replaces_conceding_x_square() {
        let board = diagonal_trap();
        let legal = board.legal_moves();
        assert_eq!(safety_override(&board, &legal, pos("b2")), Some(pos("f6")));
        assert_eq!(safety_override(&board, &legal, pos("f6")), None);
    }

    #[test]
    fn test_engine_never_plays_the_trap() {
        for seed in 0..5 {
            let mut engine = seeded(EngineConfig::with_simulations(30), seed);
            assert_eq!(engine.get_move(&diagonal_trap()), Some(pos("f6")));
        }
    }

    #[test]
    fn test_report_lists_root_children_by_visits() {
        let mut engine = seeded(EngineConfig::with_simulations(40), 5);
        let chosen = engine.get_move(&OthelloBoard::new()).unwrap();
        let report = engine.last_report().unwrap();

        assert_eq!(report.simulations, 40);
        assert_eq!(report.selected, Some(chosen));
        assert_eq!(report.moves.len(), 4);
        assert!(report.moves.windows(2).all(|w| w[0].visits >= w[1].visits));
        assert_eq!(report.reason, SelectionReason::MostVisited);
        assert_eq!(report.moves[0].mv, chosen);
    }

    #[test]
    fn test_strategic_reason_under_advantage() {
        let config = EngineConfig {
            opponent_simulation_count: Some(10),
            ..EngineConfig::with_simulations(40)
        };
        let mut engine = seeded(config, 6);
        assert!(engine.has_simulation_advantage());
        engine.get_move(&OthelloBoard::new()).unwrap();
        assert_eq!(engine.last_report().unwrap().reason, SelectionReason::Strategic);
    }

    #[test]
    fn test_opponent_hint_can_be_updated() {
        let mut engine = seeded(EngineConfig::with_simulations(100), 7);
        assert!(!engine.has_simulation_advantage());
        engine.set_opponent_simulation_count(Some(50));
        assert!(engine.has_simulation_advantage());
        engine.set_opponent_simulation_count(Some(200));
        assert!(!engine.has_simulation_advantage());
    }

    #[test]
    fn test_same_seed_same_move() {
        let board = OthelloBoard::new();
        let mut first = seeded(EngineConfig::with_simulations(60), 42);
        let mut second = seeded(EngineConfig::with_simulations(60), 42);
        assert_eq!(first.get_move(&board), second.get_move(&board));
        assert_eq!(
            first.last_report().unwrap().moves,
            second.last_report().unwrap().moves
        );
    }
}
