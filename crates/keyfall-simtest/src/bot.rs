//! Scripted typist and shopper used to drive headless sessions.

use keyfall_core::prelude::*;

/// Types at a fixed rate, finishing its current word before starting the
/// lowest unclaimed one. Every `typo_every`-th key is deliberately wrong.
pub struct Typist {
    chars_per_sec: f64,
    typo_every: u32,
    budget: f64,
    keys: u32,
    pub typos: u32,
}

impl Typist {
    pub fn new(chars_per_sec: f64, typo_every: u32) -> Self {
        Self {
            chars_per_sec,
            typo_every,
            budget: 0.0,
            keys: 0,
            typos: 0,
        }
    }

    /// Spend this frame's key budget on the engine.
    pub fn play(&mut self, engine: &mut GameEngine, dt: f64) {
        self.budget += self.chars_per_sec * dt;
        while self.budget >= 1.0 {
            self.budget -= 1.0;
            let Some(ch) = self.next_key(engine) else {
                return;
            };
            let result = engine.on_keystroke(ch);
            if result == KeyResult::Stalled {
                return;
            }
        }
    }

    fn next_key(&mut self, engine: &GameEngine) -> Option<char> {
        let words = engine.current_words();
        let active = words.iter().find(|w| w.claimant == Claimant::Player);
        let word = active.or_else(|| {
            words
                .iter()
                .filter(|w| !w.claimant.is_claimed())
                .max_by(|a, b| a.row.cmp(&b.row).then_with(|| b.column.cmp(&a.column)))
        })?;
        let expected = word.text.chars().nth(word.completed)?;

        self.keys += 1;
        if active.is_some() && self.typo_every > 0 && self.keys % self.typo_every == 0 {
            self.typos += 1;
            // Any key other than the expected one.
            return Some(if expected == '#' { '%' } else { '#' });
        }
        Some(expected)
    }

    /// Forget any partial key budget between levels.
    pub fn reset(&mut self) {
        self.budget = 0.0;
    }
}

/// Buy the cheapest affordable item until nothing is affordable.
///
/// Returns the accepted purchases. A rejected purchase must leave the stats
/// untouched; `Err` carries a description if one did not.
pub fn shop_greedily(engine: &mut GameEngine) -> Result<Vec<Purchase>, String> {
    let mut bought = Vec::new();
    loop {
        let listings = engine.shop_listings();
        let cheapest = listings
            .iter()
            .enumerate()
            .filter(|(_, l)| l.affordable)
            .min_by_key(|(_, l)| l.price)
            .map(|(index, _)| index);

        let Some(index) = cheapest else {
            // Check a rejection on the way out.
            let before = engine.current_stats().clone();
            let result = engine.purchase(listings.len());
            if result.is_accepted() || engine.current_stats() != &before {
                return Err(format!("out-of-range purchase changed state: {:?}", result));
            }
            return Ok(bought);
        };

        let before = engine.current_stats().dollars;
        let result = engine.purchase(index);
        match result {
            Purchase::Accepted { price, .. } => {
                let after = engine.current_stats().dollars;
                if before.checked_sub(price) != Some(after) {
                    return Err(format!(
                        "balance went {} -> {} for price {}",
                        before, after, price
                    ));
                }
                bought.push(result);
            }
            Purchase::Rejected(rejection) => {
                return Err(format!("affordable item rejected: {:?}", rejection));
            }
        }
    }
}
