// Row/column offset tables for move generation and evaluation

use crate::types::Loc;

// Sliding directions as (d_row, d_col)
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)]; // N, S, E, W
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)]; // NE, NW, SE, SW
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Longest possible ray on an 8x8 board
pub const MAX_RAY: u8 = 7;

/// d4, e4, d5, e5
pub const CENTER: [Loc; 4] = [
    Loc::new(3, 3),
    Loc::new(3, 4),
    Loc::new(4, 3),
    Loc::new(4, 4),
];

#[inline]
pub fn is_row_col_oob(row: i8, col: i8) -> bool {
    !(0..8).contains(&row) || !(0..8).contains(&col)
}
