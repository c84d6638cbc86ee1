//! Typing system - routes player keystrokes to words
//!
//! The player works on one word at a time. While that word is unfinished every
//! key goes to it. Otherwise a key picks the unclaimed word starting with that
//! character that is closest to the failure line.

use hecs::{Entity, World};
use keyfall_logic::word::{Claimant, Keystroke, Word};

/// The unfinished word the player is typing, if any.
pub fn player_word(world: &World) -> Option<Entity> {
    world
        .query::<&Word>()
        .iter()
        .find(|(_, word)| word.claimant() == Claimant::Player && !word.is_complete())
        .map(|(entity, _)| entity)
}

/// Best unclaimed word to start with `ch`: lowest row wins, then leftmost.
pub fn pick_target(world: &World, ch: char) -> Option<Entity> {
    world
        .query::<&Word>()
        .iter()
        .filter(|(_, word)| word.is_claimable() && word.next_char() == Some(ch))
        .max_by(|(_, a), (_, b)| {
            a.row()
                .cmp(&b.row())
                .then_with(|| b.column().cmp(&a.column()))
        })
        .map(|(entity, _)| entity)
}

/// Apply a player keystroke. `None` when there is no word to type into.
pub fn route_keystroke(world: &World, ch: char, penalty_secs: f64) -> Option<(Entity, Keystroke)> {
    let target = player_word(world).or_else(|| pick_target(world, ch))?;
    let mut word = world.get::<&mut Word>(target).ok()?;
    let result = word.on_keystroke(ch, penalty_secs);
    Some((target, result))
}
