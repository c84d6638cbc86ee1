//! Garbage collector - the probabilistic stall hazard
//!
//! Every `check_interval_secs` the collector draws a uniform integer in
//! `[0, garbage)`. A draw above the threshold fires a collection: the garbage
//! counter is emptied and typing (player keys and helper wakes) stalls for a
//! time proportional to what was collected, while words keep falling.

use keyfall_logic::config::HazardConfig;
use keyfall_logic::hazard;
use keyfall_logic::stats::Stats;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A collection that fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub garbage: u32,
    pub pause_secs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarbageCollector {
    next_check_at: f64,
    stalled_until: f64,
    collections: u32,
}

/// Roll once against the current garbage level. Never fires without garbage.
pub fn roll(stats: &Stats, rng: &mut impl Rng) -> bool {
    if stats.garbage == 0 {
        return false;
    }
    hazard::fires(rng.gen_range(0..stats.garbage), stats.gc_threshold)
}

impl GarbageCollector {
    pub fn new(now: f64, config: &HazardConfig) -> Self {
        let mut collector = Self::default();
        collector.reset(now, config);
        collector
    }

    /// Clear any stall and schedule the first roll one interval after `now`.
    pub fn reset(&mut self, now: f64, config: &HazardConfig) {
        self.next_check_at = now + config.check_interval_secs;
        self.stalled_until = now;
    }

    pub fn is_stalled(&self, now: f64) -> bool {
        now < self.stalled_until
    }

    pub fn stall_remaining(&self, now: f64) -> f64 {
        (self.stalled_until - now).max(0.0)
    }

    #[cfg(test)]
    pub(crate) fn stall_until(&mut self, until: f64) {
        self.stalled_until = until;
    }

    /// Collections fired since the collector was created.
    pub fn collections(&self) -> u32 {
        self.collections
    }

    /// Roll if a check is due and no stall is in progress.
    pub fn update(
        &mut self,
        now: f64,
        stats: &mut Stats,
        config: &HazardConfig,
        rng: &mut impl Rng,
    ) -> Option<Collection> {
        if self.is_stalled(now) || now < self.next_check_at {
            return None;
        }
        self.next_check_at = now + config.check_interval_secs;
        if !roll(stats, rng) {
            return None;
        }

        let garbage = stats.collect_garbage();
        let pause_secs = hazard::pause_secs(garbage, config);
        self.stalled_until = now + pause_secs;
        self.collections += 1;
        log::debug!(
            "garbage collection: {} units, typing stalled for {:.2}s",
            garbage,
            pause_secs
        );
        Some(Collection {
            garbage,
            pause_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_garbage_never_fires() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = Stats::new();
        stats.gc_threshold = 0;
        for _ in 0..1000 {
            assert!(!roll(&stats, &mut rng));
        }

        let config = HazardConfig::default();
        let mut collector = GarbageCollector::new(0.0, &config);
        for step in 0..100 {
            let now = f64::from(step);
            assert_eq!(collector.update(now, &mut stats, &config, &mut rng), None);
        }
        assert_eq!(collector.collections(), 0);
    }

    #[test]
    fn test_below_threshold_never_fires() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = Stats::new();
        stats.garbage = 11;
        stats.gc_threshold = 10;
        for _ in 0..1000 {
            assert!(!roll(&stats, &mut rng));
        }
    }

    #[test]
    fn test_fires_stalls_and_resets_garbage() {
        let config = HazardConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut stats = Stats::new();
        stats.gc_threshold = 0;
        let mut collector = GarbageCollector::new(0.0, &config);

        // Not due yet.
        stats.garbage = 1000;
        assert_eq!(collector.update(0.5, &mut stats, &config, &mut rng), None);

        let mut fired = None;
        let mut now = 1.0;
        while fired.is_none() && now < 100.0 {
            fired = collector.update(now, &mut stats, &config, &mut rng);
            now += 1.0;
        }
        let collection = fired.expect("collection should fire with a huge pile");
        let fired_at = now - 1.0;

        assert_eq!(collection.garbage, 1000);
        assert_eq!(collection.pause_secs, config.max_pause_secs);
        assert_eq!(stats.garbage, 0);
        assert!(collector.is_stalled(fired_at + 0.1));
        assert!(!collector.is_stalled(fired_at + config.max_pause_secs));
        assert_eq!(collector.collections(), 1);

        // No rolls while stalled.
        stats.garbage = 1000;
        assert_eq!(collector.update(fired_at + 1.0, &mut stats, &config, &mut rng), None);
        assert_eq!(stats.garbage, 1000);
    }

    #[test]
    fn test_reset_clears_stall() {
        let config = HazardConfig::default();
        let mut collector = GarbageCollector::new(0.0, &config);
        collector.stalled_until = 50.0;
        assert!(collector.is_stalled(10.0));
        assert!((collector.stall_remaining(10.0) - 40.0).abs() < 1e-9);
        collector.reset(10.0, &config);
        assert!(!collector.is_stalled(10.0));
        assert_eq!(collector.stall_remaining(10.0), 0.0);
    }
}
