//! Game engine - main entry point for running the simulation
//!
//! [`GameEngine`] owns all game state and is driven by the presentation layer:
//! [`GameEngine::tick`] once per frame with the current time, and
//! [`GameEngine::on_keystroke`] for every character the player types. Nothing
//! here reads a clock or blocks; helper wakes and collection stalls are
//! deadline comparisons against the time passed in.

use hecs::{Entity, World};
use keyfall_logic::config::GameConfig;
use keyfall_logic::economy;
use keyfall_logic::error::ConfigError;
use keyfall_logic::stats::{LevelOutcome, Stats};
use keyfall_logic::vocabulary::Vocabulary;
use keyfall_logic::word::{Claimant, Keystroke, Word};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::items::{helper_count, Item};
use crate::level::{LevelProgress, LevelSummary, Phase};
use crate::shop::{Purchase, Rejection, Shop, ShopListing};
use crate::systems::*;

/// Outcome of a player keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyResult {
    /// No level in play.
    NotPlaying,
    /// Control characters are not typed into words.
    Ignored,
    /// A garbage collection is stalling all typing.
    Stalled,
    /// No active word and no unclaimed word starts with this key.
    NoTarget,
    Typed(Keystroke),
}

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub spawned: u32,
    /// Completed words removed from the play-field.
    pub cleared: u32,
    pub helpers: HelperActivity,
    pub collection: Option<Collection>,
    /// Set on the frame the level ends.
    pub outcome: Option<LevelOutcome>,
    pub summary: Option<LevelSummary>,
}

/// Read-only view of a word for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordView {
    /// Stable for the word's lifetime.
    pub id: u64,
    pub text: String,
    pub completed: usize,
    pub claimant: Claimant,
    pub column: i32,
    pub row: i32,
}

impl WordView {
    fn new(entity: Entity, word: &Word) -> Self {
        Self {
            id: entity.to_bits().get(),
            text: word.text().to_string(),
            completed: word.completed(),
            claimant: word.claimant(),
            column: word.column(),
            row: word.row(),
        }
    }
}

/// Main simulation engine
pub struct GameEngine {
    config: GameConfig,
    vocabulary: Vocabulary,
    /// Words in play
    world: World,
    stats: Stats,
    /// Items the player owns, in purchase order
    owned: Vec<Item>,
    shop: Shop,
    collector: GarbageCollector,
    progress: LevelProgress,
    phase: Phase,
    last_summary: Option<LevelSummary>,
    /// Time of the latest tick
    now: f64,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine. `seed` drives every random choice, so two engines
    /// with the same inputs play out identically.
    pub fn new(config: GameConfig, vocabulary: Vocabulary, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "engine created: {} words, seed {}, {} words per level",
            vocabulary.len(),
            seed,
            config.words_per_level
        );
        Ok(Self {
            shop: Shop::new(&config.helper),
            collector: GarbageCollector::new(0.0, &config.hazard),
            progress: LevelProgress::new(0, config.words_per_level, 0.0),
            config,
            vocabulary,
            world: World::new(),
            stats: Stats::new(),
            owned: Vec::new(),
            phase: Phase::Idle,
            last_summary: None,
            now: 0.0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Start (or retry, or continue to) a level at `now`.
    ///
    /// Starting after a game over begins a new run: stats are reset and owned
    /// items are discarded. Returns false if a level is already in play.
    pub fn start_level(&mut self, now: f64) -> bool {
        if self.phase == Phase::Playing {
            return false;
        }
        if self.stats.is_game_over() {
            log::info!("new game after {} levels", self.stats.levels_completed);
            self.stats = Stats::new();
            self.owned.clear();
        }

        self.world.clear();
        self.progress = LevelProgress::new(
            self.stats.levels_attempted + 1,
            self.config.words_per_level,
            now,
        );
        let helpers = helper_count(&self.owned);
        for item in &mut self.owned {
            item.refresh(&self.stats, helpers);
            if let Some(helper) = item.as_helper_mut() {
                helper.arm(now, &mut self.rng);
            }
        }
        self.collector.reset(now, &self.config.hazard);
        self.now = now;
        self.phase = Phase::Playing;
        log::info!(
            "level {} started: {} words, {} helpers",
            self.progress.number,
            self.progress.target,
            helpers
        );
        true
    }

    /// Route one typed character to the player's word.
    pub fn on_keystroke(&mut self, ch: char) -> KeyResult {
        if self.phase != Phase::Playing {
            return KeyResult::NotPlaying;
        }
        if ch.is_control() {
            return KeyResult::Ignored;
        }
        if self.collector.is_stalled(self.now) {
            return KeyResult::Stalled;
        }
        match route_keystroke(&self.world, ch, self.config.wrong_key_penalty_secs) {
            Some((_, result)) => KeyResult::Typed(result),
            None => KeyResult::NoTarget,
        }
    }

    /// Advance one frame to `now`.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != Phase::Playing {
            return report;
        }
        self.now = now;

        report.spawned = spawn_words(
            &mut self.world,
            &mut self.progress,
            &self.vocabulary,
            &self.config,
            now,
            &mut self.rng,
        );
        advance_words(&mut self.world, now);

        if !self.collector.is_stalled(now) {
            report.helpers = run_helpers(
                &mut self.owned,
                &self.world,
                &mut self.stats,
                now,
                &mut self.rng,
            );
        }
        report.collection =
            self.collector
                .update(now, &mut self.stats, &self.config.hazard, &mut self.rng);

        report.cleared = remove_completed(&mut self.world, &mut self.progress);
        report.outcome = self.check_outcome(now);
        if report.outcome.is_some() {
            report.summary = self.last_summary.clone();
        }
        report
    }

    fn check_outcome(&mut self, now: f64) -> Option<LevelOutcome> {
        let outcome = if crossed_failure_line(&self.world, self.config.failure_row()) {
            self.stats.record_loss()
        } else if self.progress.is_complete() {
            let reward = economy::level_reward(
                self.config.level_reward,
                self.config.reward_growth,
                self.stats.levels_completed,
            );
            self.stats.record_win(reward)
        } else {
            return None;
        };
        self.finish_level(outcome, now);
        Some(outcome)
    }

    fn finish_level(&mut self, outcome: LevelOutcome, now: f64) {
        self.world.clear();
        for item in &mut self.owned {
            if let Some(helper) = item.as_helper_mut() {
                helper.release();
            }
        }
        self.phase = Phase::after(outcome);
        log::info!(
            "level {} ended: {:?} (player {}, helpers {}, balance {}, lives {})",
            self.progress.number,
            outcome,
            self.progress.cleared_by_player,
            self.progress.cleared_by_helpers,
            self.stats.dollars,
            self.stats.lives
        );
        self.last_summary = Some(LevelSummary {
            outcome,
            progress: self.progress,
            ended_at: now,
            stats: self.stats.clone(),
        });
    }

    /// Snapshot of the words in play.
    pub fn current_words(&self) -> Vec<WordView> {
        self.world
            .query::<&Word>()
            .iter()
            .map(|(entity, word)| WordView::new(entity, word))
            .collect()
    }

    /// Open the shop after a level. Not available mid-level or after game over.
    pub fn enter_shop(&mut self) -> bool {
        if !self.phase.can_shop() {
            return false;
        }
        self.shop.enter(&self.stats, &mut self.owned);
        self.phase = Phase::Shopping;
        true
    }

    pub fn shop_listings(&self) -> Vec<ShopListing> {
        self.shop.listings(&self.stats)
    }

    pub fn select_next_item(&mut self) {
        self.shop.select_next();
    }

    pub fn select_previous_item(&mut self) {
        self.shop.select_previous();
    }

    /// Buy catalog entry `index`.
    pub fn purchase(&mut self, index: usize) -> Purchase {
        if self.phase != Phase::Shopping {
            return Purchase::Rejected(Rejection::NotInShop);
        }
        self.shop.purchase(index, &mut self.stats, &mut self.owned)
    }

    pub fn purchase_selected(&mut self) -> Purchase {
        if self.phase != Phase::Shopping {
            return Purchase::Rejected(Rejection::NotInShop);
        }
        self.shop.purchase_selected(&mut self.stats, &mut self.owned)
    }

    /// Leave the shop and start the next level at `now`.
    pub fn exit_shop(&mut self, now: f64) -> bool {
        if self.phase != Phase::Shopping {
            return false;
        }
        self.start_level(now)
    }

    pub fn current_stats(&self) -> &Stats {
        &self.stats
    }

    /// Replace the progression record to set up a scenario. Bypasses the
    /// rules that normally guard `Stats`.
    #[doc(hidden)]
    pub fn set_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }

    pub fn owned_items(&self) -> &[Item] {
        &self.owned
    }

    pub fn owned_helpers(&self) -> usize {
        helper_count(&self.owned)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level_progress(&self) -> &LevelProgress {
        &self.progress
    }

    pub fn last_summary(&self) -> Option<&LevelSummary> {
        self.last_summary.as_ref()
    }

    /// Seconds left in the current collection stall, 0 if none.
    pub fn collection_pause_remaining(&self, now: f64) -> f64 {
        self.collector.stall_remaining(now)
    }

    pub fn collections(&self) -> u32 {
        self.collector.collections()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Time of the latest tick or level start.
    pub fn now(&self) -> f64 {
        self.now
    }
}
