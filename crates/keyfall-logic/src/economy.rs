//! Pure economy logic: shop prices and level rewards.
//!
//! Prices are recomputed from [`Stats`] and ownership counts every time the
//! shop is refreshed; nothing here caches a price.

use crate::constants::prices;
use crate::stats::Stats;

/// Price of the next helper when `owned` helpers are already owned.
/// Doubles for every owned copy.
pub fn helper_price(owned: usize) -> u64 {
    let mut price = prices::HELPER_BASE;
    for _ in 0..owned {
        price = price.saturating_mul(2);
    }
    price
}

/// Price of the next speed upgrade. Grows linearly with the current level.
pub fn cpu_upgrade_price(stats: &Stats) -> u64 {
    prices::CPU_UPGRADE_STEP.saturating_mul(u64::from(stats.cpu_upgrades))
}

/// Price of the next runtime upgrade. Tracks the platform version.
pub fn runtime_upgrade_price(stats: &Stats) -> u64 {
    (prices::RUNTIME_UPGRADE_BASE * f64::from(stats.runtime_version)).round() as u64
}

/// Currency paid for winning a level.
///
/// `growth` of 1.0 pays `base` every time; larger values scale the reward by
/// `growth^levels_completed`.
pub fn level_reward(base: u64, growth: f64, levels_completed: u32) -> u64 {
    if growth <= 1.0 {
        return base;
    }
    let exponent = i32::try_from(levels_completed).unwrap_or(i32::MAX);
    let reward = base as f64 * growth.powi(exponent);
    if reward.is_finite() && reward < u64::MAX as f64 {
        reward.round() as u64
    } else {
        u64::MAX
    }
}

/// Format a price for display.
pub fn price_label(price: u64) -> String {
    format!("${}", price)
}
