//! Player progression for a single run.
//!
//! [`Stats`] is created fresh when a run starts and again whenever the player
//! returns to play with no lives left. Level outcomes and shop purchases are
//! the only things that change it; a wrong keystroke never does.

use serde::{Deserialize, Serialize};

use crate::constants::{hazard, progression};

/// How a level ended, as recorded against [`Stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// Target reached; `reward` was paid out.
    Won { reward: u64 },
    /// A word reached the failure line and lives remain.
    Lost { lives_remaining: u8 },
    /// A word reached the failure line and that was the last life.
    GameOver,
}

/// Mutable progression record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub levels_completed: u32,
    pub levels_attempted: u32,
    /// Currency balance.
    pub dollars: u64,
    /// Lifetime currency earned this run.
    pub total_earned: u64,
    /// Speed-upgrade level; also the helper wake-interval divisor (>= 1).
    pub cpu_upgrades: u32,
    /// Platform version multiplier, raised by runtime upgrades.
    pub runtime_version: f32,
    pub lives: u8,
    /// Allocation pressure produced by helpers since the last collection.
    pub garbage: u32,
    /// Garbage-collection threshold; higher means rarer collections.
    pub gc_threshold: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            levels_completed: 0,
            levels_attempted: 0,
            dollars: 0,
            total_earned: 0,
            cpu_upgrades: progression::STARTING_CPU_UPGRADES,
            runtime_version: progression::STARTING_RUNTIME_VERSION,
            lives: progression::STARTING_LIVES,
            garbage: 0,
            gc_threshold: hazard::STARTING_GC_THRESHOLD,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    /// Record a won level and pay `reward`.
    pub fn record_win(&mut self, reward: u64) -> LevelOutcome {
        self.levels_completed += 1;
        self.levels_attempted += 1;
        self.dollars = self.dollars.saturating_add(reward);
        self.total_earned = self.total_earned.saturating_add(reward);
        LevelOutcome::Won { reward }
    }

    /// Record a lost level and take a life.
    pub fn record_loss(&mut self) -> LevelOutcome {
        self.levels_attempted += 1;
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            LevelOutcome::GameOver
        } else {
            LevelOutcome::Lost {
                lives_remaining: self.lives,
            }
        }
    }

    /// Deduct `price` if the balance covers it. Never goes negative.
    pub fn try_spend(&mut self, price: u64) -> bool {
        if price > self.dollars {
            return false;
        }
        self.dollars -= price;
        true
    }

    pub fn add_garbage(&mut self, units: u32) {
        self.garbage = self.garbage.saturating_add(units);
    }

    /// Reset the garbage counter, returning how much was collected.
    pub fn collect_garbage(&mut self) -> u32 {
        std::mem::take(&mut self.garbage)
    }

    /// Effect of buying a speed upgrade.
    pub fn apply_cpu_upgrade(&mut self) {
        self.cpu_upgrades += 1;
    }

    /// Effect of buying a runtime upgrade.
    pub fn apply_runtime_upgrade(&mut self) {
        self.runtime_version += progression::RUNTIME_VERSION_STEP;
        self.gc_threshold += hazard::GC_THRESHOLD_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = Stats::new();
        assert_eq!(stats.lives, 3);
        assert_eq!(stats.cpu_upgrades, 1);
        assert_eq!(stats.gc_threshold, 10);
        assert!((stats.runtime_version - 1.0).abs() < f32::EPSILON);
        assert_eq!(stats.dollars, 0);
        assert!(!stats.is_game_over());
    }

    #[test]
    fn test_record_win() {
        let mut stats = Stats::new();
        assert_eq!(stats.record_win(1500), LevelOutcome::Won { reward: 1500 });
        assert_eq!(stats.levels_completed, 1);
        assert_eq!(stats.levels_attempted, 1);
        assert_eq!(stats.dollars, 1500);
        assert_eq!(stats.total_earned, 1500);
    }

    #[test]
    fn test_losses_end_in_game_over() {
        let mut stats = Stats::new();
        assert_eq!(
            stats.record_loss(),
            LevelOutcome::Lost { lives_remaining: 2 }
        );
        assert_eq!(
            stats.record_loss(),
            LevelOutcome::Lost { lives_remaining: 1 }
        );
        assert_eq!(stats.record_loss(), LevelOutcome::GameOver);
        assert!(stats.is_game_over());
        assert_eq!(stats.levels_attempted, 3);
        assert_eq!(stats.levels_completed, 0);

        // Lives never underflow.
        stats.record_loss();
        assert_eq!(stats.lives, 0);
    }

    #[test]
    fn test_try_spend() {
        let mut stats = Stats::new();
        stats.dollars = 1000;
        assert!(!stats.try_spend(1001));
        assert_eq!(stats.dollars, 1000);
        assert!(stats.try_spend(1000));
        assert_eq!(stats.dollars, 0);
        assert!(stats.try_spend(0));
    }

    #[test]
    fn test_upgrades() {
        let mut stats = Stats::new();
        stats.apply_cpu_upgrade();
        assert_eq!(stats.cpu_upgrades, 2);

        stats.apply_runtime_upgrade();
        assert_eq!(stats.gc_threshold, 13);
        assert!((stats.runtime_version - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_collect_garbage() {
        let mut stats = Stats::new();
        stats.add_garbage(7);
        assert_eq!(stats.collect_garbage(), 7);
        assert_eq!(stats.garbage, 0);
    }
}
