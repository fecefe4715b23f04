pub mod game_state;
pub mod othello;
pub mod player;
pub mod position;

pub use game_state::GameState;
pub use othello::OthelloBoard;
pub use player::Player;
pub use position::{Position, BOARD_SIZE};
