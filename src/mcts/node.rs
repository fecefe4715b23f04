//! Search tree storage
//!
//! Nodes live in an arena owned by [`SearchTree`]. A node owns its children
//! through their indices and refers back to its parent by index only, so
//! ownership flows strictly from the root towards the leaves.

use crate::game::game_state::GameState;
use crate::game::player::Player;
use crate::game::position::Position;

/// Index of a node inside its [`SearchTree`].
pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// A node in the partially built game tree
#[derive(Debug, Clone)]
pub struct SearchNode<G> {
    /// Snapshot of the game at this node
    pub state: G,

    /// Parent index, `None` for the root
    pub parent: Option<NodeId>,

    /// Move that led here from the parent
    pub incoming_move: Option<Position>,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Sum of backpropagated results, from the perspective of `perspective`
    pub win_score: f64,

    /// Legal moves not yet expanded into children
    pub untried_moves: Vec<Position>,

    /// Side to move from `state`, `None` when the state is finished
    pub player_to_move: Option<Player>,

    /// Side whose results this node accumulates: the side to move, or for a
    /// finished state the opponent of the side that moved into it.
    pub perspective: Option<Player>,
}

impl<G: GameState> SearchNode<G> {
    fn new(
        state: G,
        parent: Option<NodeId>,
        incoming_move: Option<Position>,
        mover: Option<Player>,
    ) -> Self {
        let player_to_move = state.current_player();
        let untried_moves = if player_to_move.is_some() {
            state.legal_moves()
        } else {
            Vec::new()
        };

        Self {
            state,
            parent,
            incoming_move,
            children: Vec::new(),
            visit_count: 0,
            win_score: 0.0,
            untried_moves,
            player_to_move,
            perspective: player_to_move.or(mover.map(Player::opponent)),
        }
    }
}

impl<G> SearchNode<G> {
    /// UCB1 value given the parent's visit count. Unvisited nodes score
    /// positive infinity.
    pub fn ucb1(&self, parent_visits: u32, exploration_weight: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let visits = self.visit_count as f64;
        let exploitation = self.win_score / visits;
        let exploration = exploration_weight * ((parent_visits as f64).ln() / visits).sqrt();
        exploitation + exploration
    }

    pub fn update(&mut self, result: f64) {
        self.visit_count += 1;
        self.win_score += result;
    }

    /// Win rate, 0 for an unvisited node.
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.win_score / self.visit_count as f64
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty() && !self.children.is_empty()
    }
}

/// Arena holding every node of one search
#[derive(Debug, Clone)]
pub struct SearchTree<G> {
    nodes: Vec<SearchNode<G>>,
}

impl<G: GameState> SearchTree<G> {
    /// Fresh tree whose root holds `state`.
    pub fn new(state: G) -> Self {
        Self {
            nodes: vec![SearchNode::new(state, None, None, None)],
        }
    }

    /// Adds the child reached by playing `mv` from `id`.
    ///
    /// # Panics
    /// If `mv` is not one of the node's untried moves.
    pub fn expand(&mut self, id: NodeId, mv: Position) -> NodeId {
        let parent = &mut self.nodes[id];
        let Some(index) = parent.untried_moves.iter().position(|m| *m == mv) else {
            panic!("expanding move {} which is not untried at node {}", mv, id);
        };
        parent.untried_moves.swap_remove(index);

        let mut state = parent.state.clone();
        state.apply(mv);
        let mover = parent.player_to_move;

        let child_id = self.nodes.len();
        self.nodes[id].children.push(child_id);
        self.nodes
            .push(SearchNode::new(state, Some(id), Some(mv), mover));
        child_id
    }
}

impl<G> SearchTree<G> {
    pub fn node(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id]
    }

    pub fn root(&self) -> &SearchNode<G> {
        &self.nodes[ROOT]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<G>> + '_ {
        self.nodes[id].children.iter().map(move |&child| &self.nodes[child])
    }

    /// UCB1 score of `id` against its parent's visit count.
    pub fn score(&self, id: NodeId, exploration_weight: f64) -> f64 {
        let node = &self.nodes[id];
        let parent_visits = node.parent.map_or(node.visit_count, |p| self.nodes[p].visit_count);
        node.ucb1(parent_visits, exploration_weight)
    }

    /// Child with the highest UCB1 score; the earliest child wins ties.
    pub fn select_best_child(&self, id: NodeId, exploration_weight: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.nodes[id].children {
            let score = self.score(child, exploration_weight);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child, score)),
            }
        }
        best.map(|(child, _)| child)
    }

    pub fn update(&mut self, id: NodeId, result: f64) {
        self.nodes[id].update(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::othello::OthelloBoard;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn visited(visits: u32, wins: f64) -> SearchNode<()> {
        SearchNode {
            state: (),
            parent: Some(ROOT),
            incoming_move: None,
            children: Vec::new(),
            visit_count: visits,
            win_score: wins,
            untried_moves: Vec::new(),
            player_to_move: None,
            perspective: None,
        }
    }

    #[test]
    fn test_unvisited_node_scores_infinity() {
        let node = visited(0, 0.0);
        for weight in [0.0, 0.5, 1.0, 10.0] {
            assert_eq!(node.ucb1(10, weight), f64::INFINITY);
        }
    }

    #[test]
    fn test_ucb1_formula() {
        let node = visited(4, 3.0);
        let expected = 0.75 + 1.4 * ((16f64).ln() / 4.0).sqrt();
        assert!((node.ucb1(16, 1.4) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1_increases_with_exploration_weight() {
        let node = visited(5, 2.5);
        let low = node.ucb1(20, 0.5);
        let high = node.ucb1(20, 1.5);
        assert!(high > low);
    }

    #[test]
    fn test_ucb1_decreases_with_visits_at_fixed_win_rate() {
        let mut previous = f64::INFINITY;
        for visits in [1u32, 2, 4, 8, 16] {
            let node = visited(visits, visits as f64 * 0.5);
            let score = node.ucb1(100, 1.0);
            assert!(score < previous, "visits {visits}: {score} >= {previous}");
            previous = score;
        }
    }

    #[test]
    fn test_root_is_built_from_state() {
        let tree = SearchTree::new(OthelloBoard::new());
        let root = tree.root();
        assert_eq!(tree.len(), 1);
        assert_eq!(root.parent, None);
        assert_eq!(root.incoming_move, None);
        assert_eq!(root.visit_count, 0);
        assert_eq!(root.untried_moves.len(), 4);
        assert_eq!(root.player_to_move, Some(Player::Black));
        assert!(!root.is_fully_expanded());
    }

    #[test]
    fn test_expand_moves_one_untried_into_children() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        let child = tree.expand(ROOT, pos("d3"));

        assert_eq!(tree.root().untried_moves.len(), 3);
        assert!(!tree.root().untried_moves.contains(&pos("d3")));
        assert_eq!(tree.root().children, vec![child]);

        let node = tree.node(child);
        assert_eq!(node.parent, Some(ROOT));
        assert_eq!(node.incoming_move, Some(pos("d3")));
        assert_eq!(node.player_to_move, Some(Player::White));
        assert_eq!(node.perspective, Some(Player::White));
        assert_eq!(node.state.score(), (4, 1));
    }

    #[test]
    fn test_fully_expanded_after_all_moves() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        for mv in tree.root().untried_moves.clone() {
            tree.expand(ROOT, mv);
        }
        assert!(tree.root().is_fully_expanded());
        assert_eq!(tree.children(ROOT).count(), 4);
    }

    #[test]
    #[should_panic(expected = "not untried")]
    fn test_expand_rejects_unknown_move() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        tree.expand(ROOT, pos("a1"));
    }

    #[test]
    #[should_panic(expected = "not untried")]
    fn test_expand_rejects_repeated_move() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        tree.expand(ROOT, pos("d3"));
        tree.expand(ROOT, pos("d3"));
    }

    #[test]
    fn test_update_accumulates() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        tree.update(ROOT, 1.0);
        tree.update(ROOT, 0.5);
        tree.update(ROOT, 0.0);
        assert_eq!(tree.root().visit_count, 3);
        assert!((tree.root().win_score - 1.5).abs() < 1e-12);
        assert!((tree.root().win_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_select_prefers_unvisited_child() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        let first = tree.expand(ROOT, pos("d3"));
        let second = tree.expand(ROOT, pos("c4"));
        for _ in 0..10 {
            tree.update(ROOT, 1.0);
            tree.update(first, 1.0);
        }
        assert_eq!(tree.select_best_child(ROOT, 1.0), Some(second));
    }

    #[test]
    fn test_select_breaks_ties_by_insertion_order() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        let first = tree.expand(ROOT, pos("e6"));
        let second = tree.expand(ROOT, pos("d3"));
        for id in [ROOT, first, second] {
            tree.update(id, 0.5);
        }
        tree.update(ROOT, 0.5);
        assert_eq!(tree.select_best_child(ROOT, 1.0), Some(first));
        assert_eq!(tree.select_best_child(first, 1.0), None);
    }

    #[test]
    fn test_select_uses_win_rate_without_exploration() {
        let mut tree = SearchTree::new(OthelloBoard::new());
        let weak = tree.expand(ROOT, pos("d3"));
        let strong = tree.expand(ROOT, pos("c4"));
        for _ in 0..4 {
            tree.update(ROOT, 0.5);
        }
        tree.update(weak, 0.0);
        tree.update(weak, 1.0);
        tree.update(strong, 1.0);
        tree.update(strong, 1.0);
        assert_eq!(tree.select_best_child(ROOT, 0.0), Some(strong));
    }
}
