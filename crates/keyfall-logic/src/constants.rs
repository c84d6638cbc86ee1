//! Fixed rule constants.
//!
//! Tunable timings live in [`crate::config::GameConfig`]; the values here
//! define the game's economy and progression and are not configurable.

pub mod progression {
    /// Lives at the start of a run.
    pub const STARTING_LIVES: u8 = 3;
    /// Speed-upgrade count at the start of a run. Doubles as the helper
    /// wake-interval divisor, so it must never be zero.
    pub const STARTING_CPU_UPGRADES: u32 = 1;
    /// Platform version at the start of a run.
    pub const STARTING_RUNTIME_VERSION: f32 = 1.0;
    /// Platform version gained per runtime upgrade.
    pub const RUNTIME_VERSION_STEP: f32 = 0.1;
}

pub mod hazard {
    /// Garbage-collection threshold at the start of a run.
    pub const STARTING_GC_THRESHOLD: u32 = 10;
    /// Threshold gained per runtime upgrade.
    pub const GC_THRESHOLD_STEP: u32 = 3;
}

pub mod prices {
    /// Price of the first helper; each owned helper doubles it.
    pub const HELPER_BASE: u64 = 1000;
    /// Price of a speed upgrade per speed-upgrade level already held.
    pub const CPU_UPGRADE_STEP: u64 = 2000;
    /// Price of a runtime upgrade per unit of platform version.
    pub const RUNTIME_UPGRADE_BASE: f64 = 1000.0;
}
