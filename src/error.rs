//! Error types for caller mistakes. Gameplay failures are not errors;
//! see [`crate::board::Outcome`].

use thiserror::Error;

/// Rejected board construction input
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BoardError {
    #[error(
        "grid must be {full} or {visible} rows of {width} cells, got {rows} rows of {cols}",
        full = crate::grid::HEIGHT,
        visible = crate::grid::VISIBLE_HEIGHT,
        width = crate::grid::WIDTH
    )]
    GridShape { rows: usize, cols: usize },
    #[error("cell at row {row}, column {col} holds {value}, expected 0..=7")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// An action token outside `l r d hd cw ccw hold`
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseActionError {
    #[error("unrecognized action token {0:?}")]
    Unknown(String),
}
