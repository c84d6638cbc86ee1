//! Level progress, phases and summaries.

use keyfall_logic::stats::{LevelOutcome, Stats};
use serde::{Deserialize, Serialize};

/// Where the game is between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No level has been started yet.
    Idle,
    Playing,
    Won,
    Lost,
    /// Last life lost; the next level starts a new run.
    GameOver,
    Shopping,
}

/// Counters for the level in play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// 1-based level number within the run.
    pub number: u32,
    pub started_at: f64,
    /// Words that must be cleared to win.
    pub target: u32,
    pub spawned: u32,
    pub cleared_by_player: u32,
    pub cleared_by_helpers: u32,
    pub next_spawn_at: f64,
}

impl LevelProgress {
    pub fn new(number: u32, target: u32, now: f64) -> Self {
        Self {
            number,
            started_at: now,
            target,
            spawned: 0,
            cleared_by_player: 0,
            cleared_by_helpers: 0,
            next_spawn_at: now,
        }
    }

    pub fn cleared(&self) -> u32 {
        self.cleared_by_player + self.cleared_by_helpers
    }

    pub fn is_complete(&self) -> bool {
        self.cleared() >= self.target
    }
}

/// Everything the end-of-level screen needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub outcome: LevelOutcome,
    pub progress: LevelProgress,
    pub ended_at: f64,
    /// Stats after the outcome was applied.
    pub stats: Stats,
}

impl LevelSummary {
    pub fn reward(&self) -> u64 {
        match self.outcome {
            LevelOutcome::Won { reward } => reward,
            _ => 0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.ended_at - self.progress.started_at
    }
}

impl Phase {
    pub fn after(outcome: LevelOutcome) -> Self {
        match outcome {
            LevelOutcome::Won { .. } => Phase::Won,
            LevelOutcome::Lost { .. } => Phase::Lost,
            LevelOutcome::GameOver => Phase::GameOver,
        }
    }

    /// Whether the shop may be opened from this phase.
    pub fn can_shop(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_completion() {
        let mut progress = LevelProgress::new(1, 3, 0.0);
        assert!(!progress.is_complete());
        progress.cleared_by_player = 2;
        progress.cleared_by_helpers = 1;
        assert_eq!(progress.cleared(), 3);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_phase_after_outcome() {
        assert_eq!(Phase::after(LevelOutcome::Won { reward: 5 }), Phase::Won);
        assert_eq!(
            Phase::after(LevelOutcome::Lost { lives_remaining: 1 }),
            Phase::Lost
        );
        assert_eq!(Phase::after(LevelOutcome::GameOver), Phase::GameOver);
        assert!(Phase::Won.can_shop());
        assert!(!Phase::GameOver.can_shop());
        assert!(!Phase::Playing.can_shop());
    }
}
