//! Cheap one-ply checks layered on top of the tree search.

use crate::game::game_state::GameState;
use crate::game::position::Position;
use crate::strategy::position_weights::{is_corner, position_weight};

/// Whether playing `mv` lets the next side to move reply onto a corner.
pub fn concedes_corner<G: GameState>(game: &G, mv: Position) -> bool {
    let mut next = game.clone();
    next.apply(mv);
    next.legal_moves().into_iter().any(is_corner)
}

/// Keeps the moves that do not concede a corner, or all of them when every
/// move does.
pub fn without_corner_concessions<G: GameState>(game: &G, moves: &[Position]) -> Vec<Position> {
    let safe: Vec<Position> = moves
        .iter()
        .copied()
        .filter(|mv| !concedes_corner(game, *mv))
        .collect();
    if safe.is_empty() {
        moves.to_vec()
    } else {
        safe
    }
}

/// Move with the highest positional weight; the first one wins ties.
pub fn best_positional_move(moves: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for &mv in moves {
        let weight = position_weight(mv);
        match best {
            Some((_, best_weight)) if weight <= best_weight => {}
            _ => best = Some((mv, weight)),
        }
    }
    best.map(|(mv, _)| mv)
}
