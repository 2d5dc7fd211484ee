//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order
//! and the first one that fits wins.

use crate::tetromino::{Pos, Rotation, RotationDirection, Shape};

/// The O piece never needs a kick
const NO_KICKS: [Pos; 1] = [(0, 0)];

/// Get wall kick offsets for a rotation attempt, as (row_offset, col_offset)
/// pairs with rows growing downward. The first entry is always `(0, 0)`.
pub fn wall_kicks(shape: Shape, from: Rotation, direction: RotationDirection) -> &'static [Pos] {
    match shape {
        Shape::O => &NO_KICKS,
        Shape::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, direction: RotationDirection) -> &'static [Pos; 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => &[(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // R→0
        (East, CounterClockwise) => &[(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // R→2
        (East, Clockwise) => &[(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
        // 2→R
        (South, CounterClockwise) => &[(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
        // 2→L
        (South, Clockwise) => &[(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
        // L→2
        (West, CounterClockwise) => &[(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // L→0
        (West, Clockwise) => &[(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
        // 0→L
        (North, CounterClockwise) => &[(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    }
}

/// Wall kicks for I piece (different from other pieces)
fn i_piece_kicks(from: Rotation, direction: RotationDirection) -> &'static [Pos; 5] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (North, Clockwise) => &[(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // R→0
        (East, CounterClockwise) => &[(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // R→2
        (East, Clockwise) => &[(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
        // 2→R
        (South, CounterClockwise) => &[(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 2→L
        (South, Clockwise) => &[(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
        // L→2
        (West, CounterClockwise) => &[(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
        // L→0
        (West, Clockwise) => &[(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
        // 0→L
        (North, CounterClockwise) => &[(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    }
}
