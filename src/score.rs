//! Scoring system
//!
//! Within one lock, the k-th cleared line (0-indexed) is worth
//! `1000 * (k + 1)`, doubled when the lock was a T-spin.

use serde::{Deserialize, Serialize};

/// Points for the first line of a lock; later lines scale linearly
pub const LINE_BASE: u64 = 1000;

/// Type of line clear for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearType {
    /// Regular lock (0-4 lines)
    Regular(u8),
    /// T-Spin with lines cleared (0-3)
    TSpin(u8),
}

impl ClearType {
    pub fn new(lines: u8, is_tspin: bool) -> Self {
        if is_tspin {
            ClearType::TSpin(lines)
        } else {
            ClearType::Regular(lines)
        }
    }

    pub fn lines(self) -> u8 {
        match self {
            ClearType::Regular(n) | ClearType::TSpin(n) => n,
        }
    }

    pub fn is_tspin(self) -> bool {
        matches!(self, ClearType::TSpin(_))
    }

    fn multiplier(self) -> u64 {
        if self.is_tspin() { 2 } else { 1 }
    }

    /// Points awarded for this clear
    pub fn points(self) -> u64 {
        (0..u64::from(self.lines()))
            .map(|k| LINE_BASE * self.multiplier() * (k + 1))
            .sum()
    }

    /// Display label, empty for a lock that did nothing notable
    pub fn name(self) -> &'static str {
        match self {
            ClearType::Regular(0) => "",
            ClearType::Regular(1) => "Single",
            ClearType::Regular(2) => "Double",
            ClearType::Regular(3) => "Triple",
            ClearType::Regular(_) => "Tetris",
            ClearType::TSpin(0) => "T-Spin",
            ClearType::TSpin(1) => "T-Spin Single",
            ClearType::TSpin(2) => "T-Spin Double",
            ClearType::TSpin(_) => "T-Spin Triple",
        }
    }
}

/// Score tracking; both counters only ever grow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the award for one lock and return the points gained
    pub fn add_clear(&mut self, clear: ClearType) -> u64 {
        let gained = clear.points();
        self.points += gained;
        self.lines += u32::from(clear.lines());
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(ClearType::Regular(1)), 1000);
        assert_eq!(score.points, 1000);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_lines_scale_within_one_lock() {
        assert_eq!(ClearType::Regular(2).points(), 1000 + 2000);
        assert_eq!(ClearType::Regular(3).points(), 1000 + 2000 + 3000);
        assert_eq!(ClearType::Regular(4).points(), 10_000);
    }

    #[test]
    fn test_tspin_doubles() {
        assert_eq!(ClearType::TSpin(1).points(), 2000);
        assert_eq!(ClearType::TSpin(2).points(), 6000);
        assert_eq!(ClearType::TSpin(0).points(), 0);
    }

    #[test]
    fn test_no_lines_no_points() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(ClearType::Regular(0)), 0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_accumulates() {
        let mut score = Score::new();
        score.add_clear(ClearType::Regular(4));
        score.add_clear(ClearType::TSpin(2));
        assert_eq!(score.points, 16_000);
        assert_eq!(score.lines, 6);
    }

    #[test]
    fn test_names() {
        assert_eq!(ClearType::new(4, false).name(), "Tetris");
        assert_eq!(ClearType::new(2, true).name(), "T-Spin Double");
        assert_eq!(ClearType::new(0, false).name(), "");
    }
}
