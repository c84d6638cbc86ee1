//! Helper system - gives every owned helper its turn for the frame

use hecs::World;
use keyfall_logic::stats::Stats;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::items::{HelperAction, Item};

/// What all helpers did during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperActivity {
    pub woke: u32,
    pub claims: u32,
    /// Characters typed, including the first character of each claim.
    pub keystrokes: u32,
    pub completed: u32,
}

/// Tick owned items in purchase order.
pub fn run_helpers(
    items: &mut [Item],
    world: &World,
    stats: &mut Stats,
    now: f64,
    rng: &mut impl Rng,
) -> HelperActivity {
    let mut activity = HelperActivity::default();
    for item in items.iter_mut() {
        let Some(action) = item.tick(now, world, stats, rng) else {
            continue;
        };
        match action {
            HelperAction::Asleep => {}
            HelperAction::Idle => activity.woke += 1,
            HelperAction::Claimed { completed, .. } => {
                activity.woke += 1;
                activity.claims += 1;
                activity.keystrokes += 1;
                activity.completed += u32::from(completed);
            }
            HelperAction::Typed { completed, .. } => {
                activity.woke += 1;
                activity.keystrokes += 1;
                activity.completed += u32::from(completed);
            }
        }
    }
    activity
}
