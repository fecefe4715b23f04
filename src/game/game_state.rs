use crate::game::player::Player;
use crate::game::position::Position;

/// Capabilities the search engine needs from a game.
///
/// `Clone` must produce an independent deep copy: the engine clones the live
/// state before exploring and every tree node owns its own snapshot.
pub trait GameState: Clone {
    /// Legal moves for the side to move, empty when it has none.
    fn legal_moves(&self) -> Vec<Position>;

    /// Plays `mv` for the side to move, mutating in place.
    /// The move must be one of [`GameState::legal_moves`].
    fn apply(&mut self, mv: Position);

    fn is_terminal(&self) -> bool;

    /// Winning side of a finished game; `None` for a draw or an unfinished game.
    fn winner(&self) -> Option<Player>;

    /// Side to move, `None` once no side can move.
    fn current_player(&self) -> Option<Player>;

    /// Hands the turn to the other side without placing a disc. If that side
    /// cannot move either, the state becomes terminal.
    fn pass(&mut self);
}
