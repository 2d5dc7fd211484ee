//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes. Each shape is described once by a canonical
//! bitmap (3x3, or 4x4 for I and 2x2 for O); the four rotation states are
//! derived at compile time by rotating that bitmap clockwise.

use serde::{Deserialize, Serialize};

/// A (row, col) offset or grid position. Rows grow downward.
pub type Pos = (i32, i32);

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    T,
    S,
    Z,
    J,
    L,
    I,
    O,
}

impl Shape {
    /// All shapes in id order, used to fill a bag
    pub const ALL: [Shape; 7] = [
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
        Shape::I,
        Shape::O,
    ];

    /// Cell value written into the grid when this shape locks (1..=7)
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`Shape::id`]
    pub fn from_id(id: u8) -> Option<Shape> {
        match id {
            1..=7 => Some(Self::ALL[id as usize - 1]),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Shape::T => 'T',
            Shape::S => 'S',
            Shape::Z => 'Z',
            Shape::J => 'J',
            Shape::L => 'L',
            Shape::I => 'I',
            Shape::O => 'O',
        }
    }

    /// Occupied offsets for this shape at a rotation, relative to the
    /// top-left corner of its bounding box
    pub fn cells(self, rotation: Rotation) -> &'static [Pos; 4] {
        &GEOMETRY[self as usize][rotation.index()]
    }

    /// Side length of the square bounding box the shape rotates in
    pub const fn box_size(self) -> usize {
        match self {
            Shape::I => 4,
            Shape::O => 2,
            _ => 3,
        }
    }

    /// Anchor (top-left of the bounding box) where a fresh piece appears.
    /// The O piece is one column further right to sit centered.
    pub const fn spawn_anchor(self) -> Pos {
        match self {
            Shape::O => (0, 4),
            _ => (0, 3),
        }
    }
}

/// Rotation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation state as 0..4
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `(rotation + direction) mod 4`
    pub fn rotate(self, direction: RotationDirection) -> Rotation {
        let next = (self.index() as i32 + direction.step()).rem_euclid(4);
        Self::ALL[next as usize]
    }

    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(self) -> Rotation {
        self.rotate(RotationDirection::Clockwise)
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(self) -> Rotation {
        self.rotate(RotationDirection::CounterClockwise)
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub const fn step(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

type Bitmap = [[bool; 4]; 4];

const X: bool = true;
const E: bool = false;

// Canonical spawn-state bitmaps, indexed like `Shape::ALL`
const BITMAPS: [(Bitmap, usize); 7] = [
    // T
    ([[E, X, E, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]], 3),
    // S
    ([[E, X, X, E], [X, X, E, E], [E, E, E, E], [E, E, E, E]], 3),
    // Z
    ([[X, X, E, E], [E, X, X, E], [E, E, E, E], [E, E, E, E]], 3),
    // J
    ([[X, E, E, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]], 3),
    // L
    ([[E, E, X, E], [X, X, X, E], [E, E, E, E], [E, E, E, E]], 3),
    // I
    ([[E, E, E, E], [X, X, X, X], [E, E, E, E], [E, E, E, E]], 4),
    // O
    ([[X, X, E, E], [X, X, E, E], [E, E, E, E], [E, E, E, E]], 2),
];

/// Precomputed occupied offsets: [shape][rotation] -> 4 cells
static GEOMETRY: [[[Pos; 4]; 4]; 7] = build_geometry();

const fn rotate_bitmap_cw(bitmap: Bitmap, size: usize) -> Bitmap {
    let mut out = [[false; 4]; 4];
    let mut r = 0;
    while r < size {
        let mut c = 0;
        while c < size {
            out[r][c] = bitmap[size - 1 - c][r];
            c += 1;
        }
        r += 1;
    }
    out
}

const fn bitmap_cells(bitmap: Bitmap) -> [Pos; 4] {
    let mut cells = [(0, 0); 4];
    let mut found = 0;
    let mut r = 0;
    while r < 4 {
        let mut c = 0;
        while c < 4 {
            if bitmap[r][c] {
                cells[found] = (r as i32, c as i32);
                found += 1;
            }
            c += 1;
        }
        r += 1;
    }
    assert!(found == 4, "every tetromino bitmap has exactly four cells");
    cells
}

const fn build_geometry() -> [[[Pos; 4]; 4]; 7] {
    let mut table = [[[(0, 0); 4]; 4]; 7];
    let mut shape = 0;
    while shape < 7 {
        let (mut bitmap, size) = BITMAPS[shape];
        let mut rotation = 0;
        while rotation < 4 {
            table[shape][rotation] = bitmap_cells(bitmap);
            bitmap = rotate_bitmap_cw(bitmap, size);
            rotation += 1;
        }
        shape += 1;
    }
    table
}
