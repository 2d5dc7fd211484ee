//! Read-only board view handed to drivers each frame

use crate::grid::{EMPTY, HEIGHT, HIDDEN_ROWS, Row};
use crate::piece::Piece;
use crate::tetromino::{Pos, Shape};
use serde::Serialize;

/// Copy of everything a renderer needs; detached from the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Locked cells plus the live piece, row 0 at the top of the hidden buffer
    pub cells: [Row; HEIGHT],
    pub current: Option<Piece>,
    pub ghost: Vec<Pos>,
    pub held: Option<Shape>,
    pub next: Vec<Shape>,
    pub score: u64,
    pub lines_cleared: u32,
    pub dead: bool,
}

impl Snapshot {
    /// The playable rows, top to bottom
    pub fn visible_rows(&self) -> &[Row] {
        &self.cells[HIDDEN_ROWS..]
    }

    /// Ghost cells are only drawn where nothing solid is shown.
    /// Positions off the grid never show one.
    pub fn shows_ghost(&self, row: usize, col: usize) -> bool {
        self.cells.get(row).and_then(|cells| cells.get(col)) == Some(&EMPTY)
            && self
                .ghost
                .iter()
                .any(|&(r, c)| r as usize == row && c as usize == col)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Action, Board};
    use crate::grid::VISIBLE_HEIGHT;

    #[test]
    fn test_snapshot_matches_board() {
        let board = Board::with_seed(10);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.cells, board.state());
        assert_eq!(snapshot.next, board.next_pieces());
        assert_eq!(snapshot.visible_rows().len(), VISIBLE_HEIGHT);
        assert!(!snapshot.dead);
    }

    #[test]
    fn test_ghost_hidden_under_piece() {
        let mut board = Board::with_seed(10);
        let _ = board.act(Action::HardDrop);
        let snapshot = board.snapshot();
        let &(row, col) = snapshot.ghost.first().unwrap();
        assert!(snapshot.shows_ghost(row as usize, col as usize));
        // Spawned piece cells are never ghost cells
        let (r, c) = snapshot.current.unwrap().cells()[0];
        assert!(!snapshot.shows_ghost(r as usize, c as usize));
    }

    #[test]
    fn test_ghost_off_grid_is_false() {
        let snapshot = Board::with_seed(10).snapshot();
        assert!(!snapshot.shows_ghost(crate::grid::HEIGHT, 0));
        assert!(!snapshot.shows_ghost(0, crate::grid::WIDTH));
        assert!(!snapshot.shows_ghost(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_serializes_to_json() {
        let snapshot = Board::with_seed(10).snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cells"].as_array().unwrap().len(), crate::grid::HEIGHT);
        assert_eq!(json["score"], 0);
        assert_eq!(json["dead"], false);
    }
}
