//! Heuristic playouts
//!
//! Rollouts play to the end of the game with a cheap biased policy: corners
//! are taken whenever available, X-squares can be avoided, and the remaining
//! choice is random with odds proportional to the square's positional weight.

use crate::game::game_state::GameState;
use crate::game::player::Player;
use crate::game::position::Position;
use crate::strategy::position_weights::{is_corner, is_x_square, position_weight};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

/// Added to every positional weight so all rollout odds are positive.
pub const ROLLOUT_WEIGHT_OFFSET: i32 = 50;

/// Result credited for a draw or a rollout cut off by the ply cap.
pub const DRAW_SCORE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    /// Outcome of `state`; anything unfinished counts as a draw.
    pub fn of<G: GameState>(state: &G) -> Self {
        if !state.is_terminal() {
            return Outcome::Draw;
        }
        state.winner().map_or(Outcome::Draw, Outcome::Win)
    }

    /// 1.0 for a win of `perspective`, 0.0 for a loss, 0.5 otherwise.
    pub fn score_for(self, perspective: Option<Player>) -> f64 {
        match (self, perspective) {
            (Outcome::Win(winner), Some(player)) if winner == player => 1.0,
            (Outcome::Win(_), Some(_)) => 0.0,
            _ => DRAW_SCORE,
        }
    }
}

/// Picks one rollout move, `None` only when `moves` is empty.
pub fn choose_rollout_move<R: Rng + ?Sized>(
    moves: &[Position],
    avoid_x_squares: bool,
    rng: &mut R,
) -> Option<Position> {
    let corners: Vec<Position> = moves.iter().copied().filter(|m| is_corner(*m)).collect();
    if !corners.is_empty() {
        return corners.choose(rng).copied();
    }

    let mut candidates: Vec<Position> = moves.to_vec();
    if avoid_x_squares {
        let safe: Vec<Position> = moves.iter().copied().filter(|m| !is_x_square(*m)).collect();
        if !safe.is_empty() {
            candidates = safe;
        }
    }

    let weights: Vec<u32> = candidates
        .iter()
        .map(|m| (position_weight(*m) + ROLLOUT_WEIGHT_OFFSET).max(1) as u32)
        .collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(candidates[dist.sample(rng)]),
        Err(_) => candidates.choose(rng).copied(),
    }
}

/// Plays `state` forward until it is finished or `ply_cap` plies have been
/// spent. A side without a legal move passes, and a pass costs a ply.
pub fn rollout<G: GameState, R: Rng + ?Sized>(
    state: &mut G,
    ply_cap: usize,
    avoid_x_squares: bool,
    rng: &mut R,
) -> Outcome {
    let mut plies = 0;
    while plies < ply_cap && !state.is_terminal() {
        plies += 1;
        let moves = state.legal_moves();
        match choose_rollout_move(&moves, avoid_x_squares, rng) {
            Some(mv) => state.apply(mv),
            None => state.pass(),
        }
    }
    Outcome::of(state)
}
