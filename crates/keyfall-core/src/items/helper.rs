//! Helpers - purchased typists that race the player for words.
//!
//! Each helper wakes on its own schedule. On waking it either claims a random
//! unclaimed word (typing its first character) or types one more character of
//! the word it already holds. Every character typed after the claim adds one
//! unit of garbage to [`Stats`]. Once the held word is complete the helper lets
//! go of it and claims a new one at its next wake.

use hecs::{Entity, World};
use keyfall_logic::config::HelperConfig;
use keyfall_logic::economy;
use keyfall_logic::stats::Stats;
use keyfall_logic::word::Word;
use rand::seq::SliceRandom;
use rand::Rng;

/// What a helper did during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperAction {
    /// Wake deadline not reached.
    Asleep,
    /// Woke up but there was nothing to do.
    Idle,
    /// Claimed `word` and typed its first character.
    Claimed { word: Entity, completed: bool },
    /// Typed one more character of `word`.
    Typed { word: Entity, completed: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    /// Assigned on purchase; 0 for the shop template.
    id: u32,
    price: u64,
    wake_at: f64,
    base_wait: f64,
    jitter: f64,
    claimed: Option<Entity>,
    /// Wake-interval divisor, copied from `Stats::cpu_upgrades`.
    cpu_upgrades: u32,
}

impl Helper {
    pub const NAME: &'static str = "Helper";
    pub const DESCRIPTION: &'static str = "Adds a helper that types words for you";

    pub fn new(config: &HelperConfig) -> Self {
        Self {
            id: 0,
            price: economy::helper_price(0),
            wake_at: 0.0,
            base_wait: config.base_wait_secs,
            jitter: config.jitter_secs,
            claimed: None,
            cpu_upgrades: 1,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn wake_at(&self) -> f64 {
        self.wake_at
    }

    pub fn claimed(&self) -> Option<Entity> {
        self.claimed
    }

    pub fn cpu_upgrades(&self) -> u32 {
        self.cpu_upgrades
    }

    /// Average seconds between wakes, before jitter.
    pub fn interval(&self) -> f64 {
        self.base_wait / f64::from(self.cpu_upgrades.max(1))
    }

    /// Pick up the current price and speed from `stats`, dropping any claim.
    pub fn refresh(&mut self, stats: &Stats, owned_helpers: usize) {
        self.price = economy::helper_price(owned_helpers);
        self.cpu_upgrades = stats.cpu_upgrades.max(1);
        self.claimed = None;
    }

    pub fn release(&mut self) {
        self.claimed = None;
    }

    /// Drop any claim and schedule the first wake of a level.
    pub fn arm(&mut self, now: f64, rng: &mut impl Rng) {
        self.claimed = None;
        self.sleep(now, rng);
    }

    fn sleep(&mut self, now: f64, rng: &mut impl Rng) {
        let jitter = if self.jitter > 0.0 {
            rng.gen_range(0.0..self.jitter)
        } else {
            0.0
        };
        self.wake_at = now + self.interval() + jitter;
    }

    /// Run one frame for this helper.
    pub fn tick(
        &mut self,
        now: f64,
        world: &World,
        stats: &mut Stats,
        rng: &mut impl Rng,
    ) -> HelperAction {
        if now < self.wake_at {
            return HelperAction::Asleep;
        }
        let action = match self.claimed {
            None => self.claim(world, rng),
            Some(entity) => self.step(entity, world, stats),
        };
        self.sleep(now, rng);
        action
    }

    fn claim(&mut self, world: &World, rng: &mut impl Rng) -> HelperAction {
        let candidates: Vec<Entity> = world
            .query::<&Word>()
            .iter()
            .filter(|(_, word)| word.is_claimable())
            .map(|(entity, _)| entity)
            .collect();
        let Some(&target) = candidates.choose(rng) else {
            return HelperAction::Idle;
        };
        let Ok(mut word) = world.get::<&mut Word>(target) else {
            return HelperAction::Idle;
        };
        if !word.claim_for_helper(self.id) {
            return HelperAction::Idle;
        }
        let completed = word.is_complete();
        if !completed {
            self.claimed = Some(target);
        }
        log::trace!("helper {} claimed {:?}", self.id, word.text());
        HelperAction::Claimed {
            word: target,
            completed,
        }
    }

    fn step(&mut self, entity: Entity, world: &World, stats: &mut Stats) -> HelperAction {
        let Ok(mut word) = world.get::<&mut Word>(entity) else {
            // Word left the play-field.
            self.claimed = None;
            return HelperAction::Idle;
        };
        if !word.helper_step(self.id) {
            self.claimed = None;
            return HelperAction::Idle;
        }
        stats.add_garbage(1);
        let completed = word.is_complete();
        if completed {
            self.claimed = None;
        }
        HelperAction::Typed {
            word: entity,
            completed,
        }
    }
}
