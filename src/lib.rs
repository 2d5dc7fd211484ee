//! TETRS engine - guideline Tetris rules
//!
//! A 10x20 playfield with a 6-row hidden spawn buffer, SRS rotation with
//! wall kicks, hold, ghost projection, 7-bag randomization, line clears,
//! T-spins and block-out/top-out detection. Drivers call [`Board::act`] and
//! read [`Board::snapshot`]; timing, input repeat and rendering live outside.

pub mod bag;
pub mod board;
pub mod error;
pub mod grid;
pub mod mode;
pub mod piece;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod tetromino;

pub use board::{Action, Board, LockReport, Outcome};
pub use error::{BoardError, ParseActionError};
pub use snapshot::Snapshot;
pub use tetromino::{Pos, Rotation, RotationDirection, Shape};
