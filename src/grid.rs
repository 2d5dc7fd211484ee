//! Playfield grid and collision detection

use crate::error::BoardError;
use crate::tetromino::{Pos, Shape};

/// Standard Tetris board dimensions
pub const WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
/// Hidden rows above the visible board for spawning
pub const HIDDEN_ROWS: usize = 6;
pub const HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_ROWS;

/// Empty cell value; locked cells hold a shape id in 1..=7
pub const EMPTY: u8 = 0;

pub type Row = [u8; WIDTH];

/// The locked cells of the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Grid stored as [row][col], row 0 is the top of the hidden buffer,
    /// row increases downward
    cells: [Row; HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; WIDTH]; HEIGHT],
        }
    }

    /// Build a grid from caller-provided rows.
    ///
    /// Accepts either the full `HEIGHT` rows or only the `VISIBLE_HEIGHT`
    /// playable rows, in which case the hidden buffer starts empty.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let offset = match rows.len() {
            HEIGHT => 0,
            VISIBLE_HEIGHT => HIDDEN_ROWS,
            height => {
                return Err(BoardError::GridShape {
                    rows: height,
                    cols: rows.first().map_or(0, |r| r.as_ref().len()),
                });
            }
        };

        let mut grid = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != WIDTH {
                return Err(BoardError::GridShape {
                    rows: rows.len(),
                    cols: row.len(),
                });
            }
            for (col, &value) in row.iter().enumerate() {
                if Shape::from_id(value).is_none() && value != EMPTY {
                    return Err(BoardError::InvalidCell {
                        row: i,
                        col,
                        value,
                    });
                }
                grid.cells[i + offset][col] = value;
            }
        }
        Ok(grid)
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= HEIGHT || col >= WIDTH {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: u8) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= HEIGHT || col >= WIDTH {
            return false;
        }
        self.cells[row][col] = value;
        true
    }

    /// Check if a position is within bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY)
    }

    /// Out of bounds counts as filled (T-spin corner rule)
    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        !self.is_free(row, col)
    }

    /// Check if a set of block positions are all valid
    pub fn fits(&self, positions: &[Pos]) -> bool {
        positions.iter().all(|&(row, col)| self.is_free(row, col))
    }

    /// Write a piece's cells into the grid
    pub fn lock(&mut self, positions: &[Pos], shape: Shape) {
        for &(row, col) in positions {
            self.set(row, col, shape.id());
        }
    }

    /// Remove every complete row, shifting the rows above down, and return
    /// the number cleared. Row order of the survivors is preserved.
    pub fn clear_lines(&mut self) -> usize {
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if !self.is_line_full(read_row) {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row] = self.cells[read_row];
                }
            }
        }

        // Fill the top with empty rows
        self.cells[..write_row].fill([EMPTY; WIDTH]);

        write_row
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != EMPTY)
    }

    pub fn rows(&self) -> &[Row; HEIGHT] {
        &self.cells
    }

}

/// Whether a grid row index lies in the visible playing field
pub fn is_visible_row(row: i32) -> bool {
    row >= HIDDEN_ROWS as i32 && row < HEIGHT as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.rows().iter().flatten().all(|&c| c == EMPTY));
        assert!(grid.fits(&[(0, 0), (HEIGHT as i32 - 1, WIDTH as i32 - 1)]));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new();
        assert!(grid.set(5, 5, Shape::Z.id()));
        assert_eq!(grid.get(5, 5), Some(3));
        assert!(!grid.is_free(5, 5));
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(HEIGHT as i32, 0), None);
        assert_eq!(grid.get(0, WIDTH as i32), None);
        assert!(grid.is_blocked(-1, 0));
        assert!(!grid.fits(&[(0, 0), (0, WIDTH as i32)]));
    }

    #[test]
    fn test_clear_single_line() {
        let mut grid = Grid::new();
        let bottom = HEIGHT as i32 - 1;
        for col in 0..WIDTH {
            grid.set(bottom, col as i32, Shape::I.id());
        }
        // Blocks above the full row
        grid.set(bottom - 1, 0, Shape::J.id());
        grid.set(bottom - 2, 9, Shape::L.id());

        let cleared = grid.clear_lines();
        assert_eq!(cleared, 1);
        // Everything above moved down one row, in order
        assert_eq!(grid.get(bottom, 0), Some(Shape::J.id()));
        assert_eq!(grid.get(bottom - 1, 9), Some(Shape::L.id()));
        assert_eq!(grid.get(bottom - 1, 0), Some(EMPTY));
        assert_eq!(grid.get(0, 0), Some(EMPTY));
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut grid = Grid::new();
        let bottom = HEIGHT as i32 - 1;
        for col in 0..WIDTH as i32 {
            grid.set(bottom, col, 1);
            grid.set(bottom - 2, col, 2);
        }
        grid.set(bottom - 1, 4, 5);
        grid.set(bottom - 3, 7, 6);

        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.get(bottom, 4), Some(5));
        assert_eq!(grid.get(bottom - 1, 7), Some(6));
        assert_eq!(grid.rows()[..HEIGHT - 2].iter().flatten().filter(|&&c| c != EMPTY).count(), 0);
    }

    #[test]
    fn test_from_visible_rows_pads_hidden_buffer() {
        let mut rows = vec![[0u8; WIDTH]; VISIBLE_HEIGHT];
        rows[VISIBLE_HEIGHT - 1][0] = 4;
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.get(HEIGHT as i32 - 1, 0), Some(4));
        assert!(grid.rows()[..HIDDEN_ROWS].iter().flatten().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let short = vec![vec![0u8; WIDTH]; 3];
        assert_eq!(
            Grid::from_rows(&short),
            Err(BoardError::GridShape { rows: 3, cols: WIDTH })
        );

        let narrow = vec![vec![0u8; 9]; HEIGHT];
        assert_eq!(
            Grid::from_rows(&narrow),
            Err(BoardError::GridShape { rows: HEIGHT, cols: 9 })
        );

        let mut bad = vec![vec![0u8; WIDTH]; HEIGHT];
        bad[2][3] = 8;
        assert_eq!(
            Grid::from_rows(&bad),
            Err(BoardError::InvalidCell { row: 2, col: 3, value: 8 })
        );
    }

    #[test]
    fn test_visible_row_bounds() {
        assert!(!is_visible_row(HIDDEN_ROWS as i32 - 1));
        assert!(is_visible_row(HIDDEN_ROWS as i32));
        assert!(is_visible_row(HEIGHT as i32 - 1));
        assert!(!is_visible_row(HEIGHT as i32));
    }
}
