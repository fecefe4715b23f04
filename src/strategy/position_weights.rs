//! Fixed positional knowledge shared by every engine instance.

use crate::game::position::{Position, BOARD_SIZE};

/// Strategic value of each square: corners highest, X-squares and C-squares
/// penalised, edges favoured.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

pub const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 7),
    Position::new(7, 0),
    Position::new(7, 7),
];

/// Squares diagonally adjacent to a corner.
pub const X_SQUARES: [Position; 4] = [
    Position::new(1, 1),
    Position::new(1, 6),
    Position::new(6, 1),
    Position::new(6, 6),
];

/// Squares next to a corner along an edge.
pub const C_SQUARES: [Position; 8] = [
    Position::new(0, 1),
    Position::new(1, 0),
    Position::new(0, 6),
    Position::new(6, 0),
    Position::new(1, 7),
    Position::new(7, 1),
    Position::new(6, 7),
    Position::new(7, 6),
];

pub fn position_weight(pos: Position) -> i32 {
    POSITION_WEIGHTS[pos.row][pos.col]
}

pub fn is_corner(pos: Position) -> bool {
    CORNERS.contains(&pos)
}

pub fn is_x_square(pos: Position) -> bool {
    X_SQUARES.contains(&pos)
}

pub fn is_c_square(pos: Position) -> bool {
    C_SQUARES.contains(&pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_symmetric() {
        for pos in Position::all() {
            let mirrored_row = Position::new(BOARD_SIZE - 1 - pos.row, pos.col);
            let mirrored_col = Position::new(pos.row, BOARD_SIZE - 1 - pos.col);
            let transposed = Position::new(pos.col, pos.row);
            assert_eq!(position_weight(pos), position_weight(mirrored_row));
            assert_eq!(position_weight(pos), position_weight(mirrored_col));
            assert_eq!(position_weight(pos), position_weight(transposed));
        }
    }

    #[test]
    fn test_corners_are_the_best_squares() {
        let best = Position::all().map(position_weight).max().unwrap();
        for corner in CORNERS {
            assert_eq!(position_weight(corner), best);
        }
    }

    #[test]
    fn test_x_squares_are_the_worst_squares() {
        let worst = Position::all().map(position_weight).min().unwrap();
        for square in X_SQUARES {
            assert_eq!(position_weight(square), worst);
            assert!(!is_corner(square));
            assert!(!is_c_square(square));
        }
    }

    #[test]
    fn test_c_squares_touch_a_corner() {
        for square in C_SQUARES {
            assert!(position_weight(square) < 0);
            assert!(CORNERS.iter().any(|corner| {
                corner.row.abs_diff(square.row) + corner.col.abs_diff(square.col) == 1
            }));
        }
    }
}
