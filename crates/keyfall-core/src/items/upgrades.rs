//! In-place upgrades: they change [`Stats`] when bought and create nothing.

use keyfall_logic::economy;
use keyfall_logic::stats::Stats;

/// Makes helpers wake more often.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuUpgrade {
    price: u64,
}

impl CpuUpgrade {
    pub const NAME: &'static str = "CPU Upgrade";
    pub const DESCRIPTION: &'static str = "Makes your helpers type faster";

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn refresh(&mut self, stats: &Stats) {
        self.price = economy::cpu_upgrade_price(stats);
    }

    pub fn apply(&self, stats: &mut Stats) {
        stats.apply_cpu_upgrade();
    }
}

/// Raises the garbage-collection threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeUpgrade {
    price: u64,
}

impl RuntimeUpgrade {
    pub const NAME: &'static str = "Runtime Upgrade";
    pub const DESCRIPTION: &'static str = "Makes garbage collection pauses rarer";

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn refresh(&mut self, stats: &Stats) {
        self.price = economy::runtime_upgrade_price(stats);
    }

    pub fn apply(&self, stats: &mut Stats) {
        stats.apply_runtime_upgrade();
    }
}
