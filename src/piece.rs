//! Active falling piece
//!
//! A `Piece` is a plain value: shape, rotation state, anchor and the kind of
//! the last successful move. It knows nothing about the grid; the board
//! builds candidate pieces with [`Piece::translated`] / [`Piece::rotated`]
//! and decides whether to commit them.

use crate::tetromino::{Pos, Rotation, RotationDirection, Shape};
use serde::{Deserialize, Serialize};

/// Unit step directions. `Up` is only used internally (ghost and drop bookkeeping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta with rows growing downward
    pub const fn delta(self) -> Pos {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// What last moved the piece (for T-spin detection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LastAction {
    #[default]
    Spawn,
    Translation,
    Rotation,
}

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// The type of tetromino
    pub shape: Shape,
    /// Current rotation state
    pub rotation: Rotation,
    /// Top-left corner of the shape's bounding box, (row, col)
    pub anchor: Pos,
    pub last_action: LastAction,
}

/// Grid cells covered by `shape` at `rotation` when its box sits at `anchor`
pub fn occupied(shape: Shape, rotation: Rotation, anchor: Pos) -> [Pos; 4] {
    let (row, col) = anchor;
    shape.cells(rotation).map(|(dr, dc)| (row + dr, col + dc))
}

impl Piece {
    /// Create a new piece at its spawn position
    pub fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            rotation: Rotation::North,
            anchor: shape.spawn_anchor(),
            last_action: LastAction::Spawn,
        }
    }

    /// Get the absolute positions of all 4 blocks
    pub fn cells(&self) -> [Pos; 4] {
        occupied(self.shape, self.rotation, self.anchor)
    }

    pub fn row(&self) -> i32 {
        self.anchor.0
    }

    pub fn col(&self) -> i32 {
        self.anchor.1
    }

    /// The same piece moved by an arbitrary offset. Keeps `last_action`.
    pub fn shifted(&self, (dr, dc): Pos) -> Self {
        Self {
            anchor: (self.anchor.0 + dr, self.anchor.1 + dc),
            ..*self
        }
    }

    /// Candidate after a one-cell step
    pub fn translated(&self, direction: Direction) -> Self {
        Self {
            last_action: LastAction::Translation,
            ..self.shifted(direction.delta())
        }
    }

    /// Candidate after a bare rotation about the bounding box, before any kick
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            last_action: LastAction::Rotation,
            ..*self
        }
    }

    /// Check if this is a T piece (for T-spin detection)
    pub fn is_t_piece(&self) -> bool {
        matches!(self.shape, Shape::T)
    }

    /// The four corners of the piece's bounding box (the T's 3x3), used by
    /// the 3-corner rule
    pub fn box_corners(&self) -> [Pos; 4] {
        let (row, col) = self.anchor;
        let far = self.shape.box_size() as i32 - 1;
        [(row, col), (row, col + far), (row + far, col), (row + far, col + far)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(Shape::T);
        assert_eq!(piece.anchor, (0, 3));
        assert_eq!(piece.cells(), [(0, 4), (1, 3), (1, 4), (1, 5)]);

        // O is shifted one column to stay centered
        let piece = Piece::spawn(Shape::O);
        assert_eq!(piece.anchor, (0, 4));
        assert_eq!(piece.cells(), [(0, 4), (0, 5), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_translate_is_pure() {
        let piece = Piece::spawn(Shape::L);
        let moved = piece.translated(Direction::Down);
        assert_eq!(piece.anchor, (0, 3));
        assert_eq!(moved.anchor, (1, 3));
        assert_eq!(moved.last_action, LastAction::Translation);
        assert_eq!(moved.translated(Direction::Up).anchor, piece.anchor);
        assert_eq!(piece.translated(Direction::Left).col(), 2);
        assert_eq!(piece.translated(Direction::Right).col(), 4);
    }

    #[test]
    fn test_rotation_tags_last_action() {
        let piece = Piece::spawn(Shape::T).rotated(RotationDirection::Clockwise);
        assert_eq!(piece.rotation, Rotation::East);
        assert_eq!(piece.last_action, LastAction::Rotation);
        assert_eq!(piece.anchor, (0, 3));
    }

    #[test]
    fn test_four_rotations_restore_cells() {
        for shape in Shape::ALL {
            let start = Piece::spawn(shape).shifted((10, 0));
            let original: BTreeSet<_> = start.cells().into_iter().collect();
            for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
                let mut piece = start;
                for _ in 0..4 {
                    piece = piece.rotated(direction);
                }
                let cells: BTreeSet<_> = piece.cells().into_iter().collect();
                assert_eq!(cells, original, "{shape:?} {direction:?}");
                assert_eq!(piece.rotation, start.rotation);
            }
        }
    }

    #[test]
    fn test_box_corners() {
        let piece = Piece::spawn(Shape::T).shifted((5, 0));
        assert_eq!(piece.box_corners(), [(5, 3), (5, 5), (7, 3), (7, 5)]);
    }
}
