//! Game modes: Marathon, Sprint, Ultra
//!
//! Modes only decide when a game that is still alive is finished. The board
//! knows nothing about them; drivers check [`ModeState::is_complete`] after
//! each action.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Lines to clear in Sprint
pub const SPRINT_LINES: u32 = 40;
/// Ultra time limit
pub const ULTRA_LIMIT: Duration = Duration::from_secs(120);

/// Available game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Marathon, // Endless, ends only on block-out or top-out
    Sprint,   // Clear 40 lines
    Ultra,    // Score as much as possible in 2 minutes
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Marathon => "Marathon",
            GameMode::Sprint => "Sprint",
            GameMode::Ultra => "Ultra",
        }
    }
}

/// Mode-specific game state
#[derive(Debug, Clone)]
pub struct ModeState {
    pub mode: GameMode,
    start_time: Instant,
    /// For Sprint: lines to clear
    pub target_lines: u32,
    /// For Ultra: time limit
    pub time_limit: Duration,
}

impl ModeState {
    /// Start the clock for a fresh game
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            start_time: Instant::now(),
            target_lines: SPRINT_LINES,
            time_limit: ULTRA_LIMIT,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Check if the goal is reached after `elapsed` of play
    pub fn is_complete_at(&self, lines_cleared: u32, elapsed: Duration) -> bool {
        match self.mode {
            GameMode::Marathon => false,
            GameMode::Sprint => lines_cleared >= self.target_lines,
            GameMode::Ultra => elapsed >= self.time_limit,
        }
    }

    /// Check if game is complete based on mode
    pub fn is_complete(&self, lines_cleared: u32) -> bool {
        self.is_complete_at(lines_cleared, self.elapsed())
    }

    /// Lines remaining for Sprint mode (None for other modes)
    pub fn lines_remaining(&self, lines_cleared: u32) -> Option<u32> {
        match self.mode {
            GameMode::Sprint => Some(self.target_lines.saturating_sub(lines_cleared)),
            _ => None,
        }
    }

    /// Time remaining for Ultra mode (None for other modes)
    pub fn time_remaining(&self, elapsed: Duration) -> Option<Duration> {
        match self.mode {
            GameMode::Ultra => Some(self.time_limit.saturating_sub(elapsed)),
            _ => None,
        }
    }
}

/// Format a duration as MM:SS.mmm
pub fn format_time(elapsed: Duration) -> String {
    let total_millis = elapsed.as_millis();
    let minutes = total_millis / 60000;
    let seconds = (total_millis % 60000) / 1000;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}
