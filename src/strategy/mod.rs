pub mod lookahead;
pub mod position_weights;

pub use lookahead::{best_positional_move, concedes_corner, without_corner_concessions};
pub use position_weights::{
    is_c_square, is_corner, is_x_square, position_weight, CORNERS, C_SQUARES, POSITION_WEIGHTS,
    X_SQUARES,
};
