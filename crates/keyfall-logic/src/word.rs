//! Falling words.
//!
//! A [`Word`] is spawned at the top of the play-field and falls at a fixed
//! speed. Its row is never stored as independent state: it is recomputed from
//! the spawn clock on every [`Word::advance`], which is what lets a wrong
//! keystroke punish the player by moving the spawn clock instead of the row.
//!
//! The first character typed into a word decides who owns it. After that only
//! the owner can make progress on it.

use serde::{Deserialize, Serialize};

use crate::error::WordError;

/// Who is credited with typing a word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Claimant {
    #[default]
    Unclaimed,
    Player,
    /// A purchased helper, identified by its item id.
    Helper(u32),
}

impl Claimant {
    pub fn is_claimed(self) -> bool {
        !matches!(self, Claimant::Unclaimed)
    }
}

/// Result of routing one player keystroke to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keystroke {
    /// The word is complete or belongs to a helper; nothing changed.
    Ignored,
    /// The key matched and the word still has characters left.
    Advanced,
    /// The key matched the last character.
    Completed,
    /// The key did not match; the word was pushed towards the failure line.
    Penalized,
}

/// A falling token with per-character completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    text: String,
    len: usize,
    completed: usize,
    claimant: Claimant,
    /// Spawn clock in seconds. Wrong keystrokes move it into the past.
    spawned_at: f64,
    column: i32,
    base_row: i32,
    /// Rows per second.
    fall_speed: f32,
    row: i32,
}

impl Word {
    /// Create a word at `(column, base_row)` spawned at `now`.
    pub fn new(
        text: impl Into<String>,
        column: i32,
        base_row: i32,
        now: f64,
        fall_speed: f32,
    ) -> Result<Self, WordError> {
        let text = text.into();
        let len = text.chars().count();
        if len == 0 {
            return Err(WordError::Empty);
        }
        Ok(Self {
            text,
            len,
            completed: 0,
            claimant: Claimant::Unclaimed,
            spawned_at: now,
            column,
            base_row,
            fall_speed,
            row: base_row,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn claimant(&self) -> Claimant {
        self.claimant
    }

    pub fn spawned_at(&self) -> f64 {
        self.spawned_at
    }

    pub fn column(&self) -> i32 {
        self.column
    }

    /// Row as of the last [`Word::advance`].
    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.len
    }

    /// Unclaimed and still typeable.
    pub fn is_claimable(&self) -> bool {
        !self.claimant.is_claimed() && !self.is_complete()
    }

    /// The character that must be typed next, if any.
    pub fn next_char(&self) -> Option<char> {
        self.text.chars().nth(self.completed)
    }

    /// Recompute the row from the time elapsed since spawn.
    pub fn advance(&mut self, now: f64) {
        let elapsed = (now - self.spawned_at).max(0.0);
        self.row = self.base_row + (elapsed * f64::from(self.fall_speed)).floor() as i32;
    }

    /// Whether an unfinished word has reached `failure_row`.
    pub fn has_crossed(&self, failure_row: i32) -> bool {
        !self.is_complete() && self.row >= failure_row
    }

    /// Move the spawn clock back by `secs`, making the word fall further.
    pub fn penalize(&mut self, secs: f64) {
        self.spawned_at -= secs;
    }

    /// Route a player keystroke to this word.
    ///
    /// A match advances the word and claims it for the player if nobody owns
    /// it yet. A mismatch costs `penalty_secs` of fall time. Words that are
    /// complete or owned by a helper ignore the key.
    pub fn on_keystroke(&mut self, ch: char, penalty_secs: f64) -> Keystroke {
        if self.is_complete() || matches!(self.claimant, Claimant::Helper(_)) {
            return Keystroke::Ignored;
        }
        if self.next_char() != Some(ch) {
            self.penalize(penalty_secs);
            return Keystroke::Penalized;
        }
        self.claimant = Claimant::Player;
        self.completed += 1;
        debug_assert!(self.completed <= self.len);
        if self.is_complete() {
            Keystroke::Completed
        } else {
            Keystroke::Advanced
        }
    }

    /// Claim an unclaimed word for helper `id`, crediting its first character.
    ///
    /// Returns false if the word is already claimed or complete.
    pub fn claim_for_helper(&mut self, id: u32) -> bool {
        if !self.is_claimable() {
            return false;
        }
        self.claimant = Claimant::Helper(id);
        self.completed += 1;
        true
    }

    /// Type one more character on behalf of helper `id`.
    ///
    /// Returns false if the word is not owned by that helper or is complete.
    pub fn helper_step(&mut self, id: u32) -> bool {
        if self.claimant != Claimant::Helper(id) || self.is_complete() {
            return false;
        }
        self.completed += 1;
        debug_assert!(self.completed <= self.len);
        true
    }
}
