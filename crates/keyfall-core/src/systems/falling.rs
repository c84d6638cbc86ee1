//! Falling system - word positions, failure line and cleanup

use hecs::{Entity, World};
use keyfall_logic::word::{Claimant, Word};

use crate::level::LevelProgress;

/// Recompute every word's row for `now`.
pub fn advance_words(world: &mut World, now: f64) {
    for (_, word) in world.query_mut::<&mut Word>() {
        word.advance(now);
    }
}

/// Whether any unfinished word has reached the failure line.
pub fn crossed_failure_line(world: &World, failure_row: i32) -> bool {
    world
        .query::<&Word>()
        .iter()
        .any(|(_, word)| word.has_crossed(failure_row))
}

/// Despawn completed words and credit whoever finished them.
pub fn remove_completed(world: &mut World, progress: &mut LevelProgress) -> u32 {
    let done: Vec<(Entity, Claimant)> = world
        .query::<&Word>()
        .iter()
        .filter(|(_, word)| word.is_complete())
        .map(|(entity, word)| (entity, word.claimant()))
        .collect();

    for &(entity, claimant) in &done {
        match claimant {
            Claimant::Player => progress.cleared_by_player += 1,
            Claimant::Helper(_) => progress.cleared_by_helpers += 1,
            // A finished word always has a claimant.
            Claimant::Unclaimed => {}
        }
        let despawned = world.despawn(entity);
        debug_assert!(despawned.is_ok(), "completed word vanished before cleanup");
    }
    done.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_cross() {
        let mut world = World::new();
        world.spawn((Word::new("chan", 0, 0, 0.0, 2.0).unwrap(),));
        world.spawn((Word::new("defer", 10, 0, 3.0, 2.0).unwrap(),));

        advance_words(&mut world, 4.0);
        let mut rows: Vec<i32> = world.query::<&Word>().iter().map(|(_, w)| w.row()).collect();
        rows.sort();
        assert_eq!(rows, vec![2, 8]);
        assert!(!crossed_failure_line(&world, 9));
        assert!(crossed_failure_line(&world, 8));
    }

    #[test]
    fn test_remove_completed_credits_claimant() {
        let mut world = World::new();
        let mut typed = Word::new("go", 0, 0, 0.0, 1.0).unwrap();
        typed.on_keystroke('g', 1.0);
        typed.on_keystroke('o', 1.0);
        let mut helped = Word::new("a", 0, 0, 0.0, 1.0).unwrap();
        helped.claim_for_helper(4);
        let pending = Word::new("select", 0, 0, 0.0, 1.0).unwrap();

        world.spawn((typed,));
        world.spawn((helped,));
        let pending = world.spawn((pending,));

        let mut progress = LevelProgress::new(1, 10, 0.0);
        assert_eq!(remove_completed(&mut world, &mut progress), 2);
        assert_eq!(progress.cleared_by_player, 1);
        assert_eq!(progress.cleared_by_helpers, 1);
        assert_eq!(world.len(), 1);
        assert!(world.contains(pending));
    }
}
