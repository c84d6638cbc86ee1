//! Garbage-collection hazard rules.
//!
//! Helpers generate "garbage" as they type. At a fixed cadence the engine
//! draws a uniform integer in `[0, garbage)`; if the draw exceeds the
//! threshold a collection fires, stalling all typing for a while and emptying
//! the counter. The functions here are the deterministic half of that: the
//! firing rule for a given draw, the exact odds, and the stall length.

use crate::config::HazardConfig;

/// Whether a draw from `[0, garbage)` fires a collection.
pub fn fires(draw: u32, threshold: u32) -> bool {
    draw > threshold
}

/// Probability that a roll fires with `garbage` units accumulated.
///
/// Zero when there is no garbage. Strictly non-increasing in `threshold`.
pub fn collection_odds(garbage: u32, threshold: u32) -> f64 {
    if garbage == 0 {
        return 0.0;
    }
    // Draws threshold+1 ..= garbage-1 fire.
    let firing = garbage.saturating_sub(threshold).saturating_sub(1);
    f64::from(firing) / f64::from(garbage)
}

/// How long a collection stalls typing, in seconds.
pub fn pause_secs(garbage: u32, config: &HazardConfig) -> f64 {
    let pause = config.base_pause_secs + config.pause_per_garbage_secs * f64::from(garbage);
    pause.min(config.max_pause_secs)
}
