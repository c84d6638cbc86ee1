//! Keyfall Core - Falling Words Typing Game Engine
//!
//! Words fall down a play-field and must be typed before they reach the
//! failure line. Money earned by clearing levels buys helpers, which race the
//! player for unclaimed words, and upgrades. Every keystroke a helper makes
//! piles up garbage that can trigger a garbage-collection stall.
//!
//! # Architecture
//!
//! Words in play live in a `hecs` world so that helpers can hold generational
//! handles to the words they claim:
//! - **Words**: the only entity type, built from [`keyfall_logic::word::Word`]
//! - **Items**: owned helpers and upgrades, a closed enum
//! - **Systems**: free functions over the world run in a fixed order each frame
//!
//! # Example
//!
//! ```rust,no_run
//! use keyfall_core::prelude::*;
//!
//! let vocabulary = Vocabulary::parse("go chan defer select").unwrap();
//! let mut engine = GameEngine::new(GameConfig::default(), vocabulary, 7).unwrap();
//!
//! engine.start_level(0.0);
//! let mut now = 0.0;
//! loop {
//!     now += 1.0 / 30.0; // 30 FPS
//!     engine.on_keystroke('g');
//!     if engine.tick(now).outcome.is_some() {
//!         break;
//!     }
//! }
//! ```

pub mod engine;
pub mod items;
pub mod level;
pub mod shop;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{GameEngine, KeyResult, TickReport, WordView};
    pub use crate::items::{Item, ItemKind};
    pub use crate::level::{LevelProgress, LevelSummary, Phase};
    pub use crate::shop::{Purchase, Rejection, ShopListing};
    pub use keyfall_logic::config::GameConfig;
    pub use keyfall_logic::stats::{LevelOutcome, Stats};
    pub use keyfall_logic::vocabulary::Vocabulary;
    pub use keyfall_logic::word::{Claimant, Keystroke};
}
