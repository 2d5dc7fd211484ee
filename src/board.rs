//! Core game state and rules
//!
//! [`Board`] owns the grid, the live piece, hold slot, next queue and
//! counters. Every change goes through [`Board::act`]: build a candidate
//! piece, validate it against the grid, then commit it or leave the board
//! untouched.

use crate::bag::Bag;
use crate::error::{BoardError, ParseActionError};
use crate::grid::{self, Grid, HEIGHT, Row};
use crate::piece::{Direction, LastAction, Piece};
use crate::score::{ClearType, Score};
use crate::snapshot::Snapshot;
use crate::srs::wall_kicks;
use crate::tetromino::{Pos, RotationDirection, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of filled box corners that make a T-spin
const TSPIN_CORNERS: usize = 3;

/// Input actions the board can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Hold,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::SoftDrop,
        Action::HardDrop,
        Action::RotateCW,
        Action::RotateCCW,
        Action::Hold,
    ];

    /// Canonical text token, as read by line-based drivers
    pub const fn token(self) -> &'static str {
        match self {
            Action::MoveLeft => "l",
            Action::MoveRight => "r",
            Action::SoftDrop => "d",
            Action::HardDrop => "hd",
            Action::RotateCW => "cw",
            Action::RotateCCW => "ccw",
            Action::Hold => "hold",
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.token() == token)
            .ok_or_else(|| ParseActionError::Unknown(token.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Result of one [`Board::act`] call
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Not a recognized action, or the game is over. Nothing changed.
    Rejected,
    /// The move or rotation does not fit. Nothing changed.
    Failed,
    /// The board changed
    Applied,
}

/// What happened on the most recent lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockReport {
    pub shape: Shape,
    pub cells: [Pos; 4],
    pub clear: ClearType,
    pub points: u64,
    /// The piece locked entirely inside the hidden buffer
    pub block_out: bool,
}

/// The authoritative game-rules engine
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    /// Live piece; `None` only once the game is over
    current: Option<Piece>,
    held: Option<Shape>,
    /// Whether hold has been used this piece
    hold_used: bool,
    bag: Bag,
    score: Score,
    /// Cells of the current piece dropped straight down
    ghost: Option<[Pos; 4]>,
    dead: bool,
    pieces_locked: u32,
    last_lock: Option<LockReport>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with a randomly seeded bag
    pub fn new() -> Self {
        Self::build(Grid::new(), Bag::new())
    }

    /// Empty board with a deterministic bag
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Grid::new(), Bag::with_seed(seed))
    }

    /// Board over a predefined grid, see [`Grid::from_rows`] for accepted shapes.
    /// The first piece spawns immediately, so a grid that already blocks the
    /// spawn area gives a board that is over from the start.
    pub fn from_grid<R: AsRef<[u8]>>(rows: &[R], seed: Option<u64>) -> Result<Self, BoardError> {
        let grid = Grid::from_rows(rows)?;
        let bag = seed.map_or_else(Bag::new, Bag::with_seed);
        Ok(Self::build(grid, bag))
    }

    fn build(grid: Grid, bag: Bag) -> Self {
        let mut board = Self {
            grid,
            current: None,
            held: None,
            hold_used: false,
            bag,
            score: Score::new(),
            ghost: None,
            dead: false,
            pieces_locked: 0,
            last_lock: None,
        };
        board.spawn_next();
        board
    }

    /// Process an action
    pub fn act(&mut self, action: Action) -> Outcome {
        if self.dead {
            tracing::debug!(%action, "action after game over");
            return Outcome::Rejected;
        }

        let outcome = match action {
            Action::MoveLeft => self.shift(Direction::Left),
            Action::MoveRight => self.shift(Direction::Right),
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::RotateCW => self.rotate(RotationDirection::Clockwise),
            Action::RotateCCW => self.rotate(RotationDirection::CounterClockwise),
            Action::Hold => self.hold(),
        };
        tracing::debug!(%action, ?outcome, "act");
        outcome
    }

    /// Parse a text token and process it. Unknown tokens are `Rejected`.
    pub fn act_token(&mut self, token: &str) -> Outcome {
        match token.parse::<Action>() {
            Ok(action) => self.act(action),
            Err(err) => {
                tracing::warn!(%err, "rejected action");
                Outcome::Rejected
            }
        }
    }

    fn is_valid(&self, piece: &Piece) -> bool {
        self.grid.fits(&piece.cells())
    }

    fn shift(&mut self, direction: Direction) -> Outcome {
        let Some(piece) = self.current else {
            return Outcome::Rejected;
        };

        let candidate = piece.translated(direction);
        if !self.is_valid(&candidate) {
            return Outcome::Failed;
        }
        self.current = Some(candidate);
        self.refresh_ghost();
        Outcome::Applied
    }

    /// One row down, or lock in place when resting on something
    fn soft_drop(&mut self) -> Outcome {
        let Some(piece) = self.current else {
            return Outcome::Rejected;
        };

        let candidate = piece.translated(Direction::Down);
        if self.is_valid(&candidate) {
            // Column and rotation are unchanged, so is the landing spot
            self.current = Some(candidate);
        } else {
            self.lock_current();
        }
        Outcome::Applied
    }

    fn hard_drop(&mut self) -> Outcome {
        let Some(piece) = self.current else {
            return Outcome::Rejected;
        };

        let landed = self.landing(piece);
        let distance = landed.row() - piece.row();
        if distance > 0 {
            self.current = Some(Piece {
                last_action: LastAction::Translation,
                ..landed
            });
        }
        tracing::trace!(distance, "hard drop");
        self.lock_current();
        Outcome::Applied
    }

    /// Rotate with SRS wall kicks; first fitting offset wins
    fn rotate(&mut self, direction: RotationDirection) -> Outcome {
        let Some(piece) = self.current else {
            return Outcome::Rejected;
        };

        let rotated = piece.rotated(direction);
        // The first kick is (0, 0): the plain rotation
        let placed = wall_kicks(piece.shape, piece.rotation, direction)
            .iter()
            .map(|&kick| rotated.shifted(kick))
            .find(|candidate| self.is_valid(candidate));

        match placed {
            Some(candidate) => {
                self.current = Some(candidate);
                self.refresh_ghost();
                Outcome::Applied
            }
            None => Outcome::Failed,
        }
    }

    fn hold(&mut self) -> Outcome {
        if self.hold_used {
            return Outcome::Failed;
        }
        let Some(piece) = self.current.take() else {
            return Outcome::Rejected;
        };

        // A previously held piece comes back before the rest of the queue
        if let Some(held) = self.held.replace(piece.shape) {
            self.bag.push_front(held);
        }
        tracing::debug!(held = ?piece.shape, "hold");
        self.spawn_next();
        self.hold_used = true;
        Outcome::Applied
    }

    /// Lock the current piece, clear lines, score, and spawn the next
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let cells = piece.cells();
        self.grid.lock(&cells, piece.shape);
        let block_out = !cells.iter().any(|&(row, _)| grid::is_visible_row(row));

        // Detect T-spin before clearing lines
        let is_tspin = self.detect_t_spin(&piece);
        let lines = self.grid.clear_lines();
        let clear = ClearType::new(lines as u8, is_tspin);
        let points = self.score.add_clear(clear);
        self.pieces_locked += 1;

        if lines > 0 || is_tspin {
            tracing::info!(
                clear = clear.name(),
                points,
                score = self.score.points,
                lines = self.score.lines,
                "line clear"
            );
        }

        self.last_lock = Some(LockReport {
            shape: piece.shape,
            cells,
            clear,
            points,
            block_out,
        });

        if block_out {
            self.game_over("block out");
        } else {
            self.spawn_next();
        }
    }

    /// 3-corner rule: a T locked right after a rotation with at least three
    /// of its box corners filled or out of bounds
    fn detect_t_spin(&self, piece: &Piece) -> bool {
        if !piece.is_t_piece() || piece.last_action != LastAction::Rotation {
            return false;
        }
        let filled = piece
            .box_corners()
            .iter()
            .filter(|&&(row, col)| self.grid.is_blocked(row, col))
            .count();
        filled >= TSPIN_CORNERS
    }

    /// Take the next shape from the queue and place it at the top
    fn spawn_next(&mut self) {
        let shape = self.bag.next();
        let piece = Piece::spawn(shape);
        self.hold_used = false;

        // Check for top out
        if !self.is_valid(&piece) {
            self.game_over("top out");
            return;
        }

        tracing::debug!(?shape, "spawn");
        self.current = Some(piece);
        self.refresh_ghost();
    }

    fn game_over(&mut self, reason: &'static str) {
        self.dead = true;
        self.current = None;
        self.ghost = None;
        tracing::warn!(
            reason,
            score = self.score.points,
            lines = self.score.lines,
            pieces = self.pieces_locked,
            "game over"
        );
    }

    /// Lowest valid position straight below `piece`
    fn landing(&self, piece: Piece) -> Piece {
        let mut probe = piece;
        while self.is_valid(&probe) {
            probe = probe.shifted(Direction::Down.delta());
        }
        probe.shifted(Direction::Up.delta())
    }

    fn refresh_ghost(&mut self) {
        let ghost = self.current.map(|piece| self.landing(piece).cells());
        self.ghost = ghost;
    }

    /// Locked cells with the live piece drawn on top
    pub fn state(&self) -> [Row; HEIGHT] {
        let mut cells = *self.grid.rows();
        if let Some(piece) = &self.current {
            for (row, col) in piece.cells() {
                cells[row as usize][col as usize] = piece.shape.id();
            }
        }
        cells
    }

    /// Everything a driver needs to draw one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.state(),
            current: self.current,
            ghost: self.ghost_cells().to_vec(),
            held: self.held,
            next: self.next_pieces().to_vec(),
            score: self.score.points,
            lines_cleared: self.score.lines,
            dead: self.dead,
        }
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.lines
    }

    pub fn dead(&self) -> bool {
        self.dead
    }

    pub fn held_piece(&self) -> Option<Shape> {
        self.held
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Upcoming shapes, next first
    pub fn next_pieces(&self) -> &[Shape] {
        self.bag.queue()
    }

    pub fn ghost_cells(&self) -> &[Pos] {
        self.ghost.as_ref().map_or(&[], |cells| cells.as_slice())
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn last_lock(&self) -> Option<&LockReport> {
        self.last_lock.as_ref()
    }
}
