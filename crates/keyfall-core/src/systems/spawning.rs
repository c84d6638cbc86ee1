//! Spawning system - drops new words onto the play-field

use hecs::World;
use keyfall_logic::config::GameConfig;
use keyfall_logic::vocabulary::Vocabulary;
use keyfall_logic::word::Word;
use rand::Rng;

use crate::level::LevelProgress;

/// Spawn every word whose spawn time has come, returning how many spawned.
///
/// A word is due every `spawn_interval_secs` from the start of the level
/// until the level target has been spawned. Words that were due during a
/// long frame get their scheduled spawn time, so they appear already fallen.
pub fn spawn_words(
    world: &mut World,
    progress: &mut LevelProgress,
    vocabulary: &Vocabulary,
    config: &GameConfig,
    now: f64,
    rng: &mut impl Rng,
) -> u32 {
    let width = usize::from(config.playfield.width);
    let mut spawned = 0;

    while progress.spawned < progress.target && now >= progress.next_spawn_at {
        let spawn_time = progress.next_spawn_at;
        progress.next_spawn_at += config.spawn_interval_secs;

        let text = &vocabulary.words()[rng.gen_range(0..vocabulary.len())];
        let len = text.chars().count();
        let column = if len < width {
            rng.gen_range(0..=width - len)
        } else {
            0
        };

        match Word::new(text.as_str(), column as i32, 0, spawn_time, config.fall_speed) {
            Ok(word) => {
                world.spawn((word,));
                progress.spawned += 1;
                spawned += 1;
            }
            Err(err) => {
                // Unreachable with a parsed vocabulary; shrink the target so
                // the level can still be won.
                log::warn!("skipping word {:?}: {}", text, err);
                progress.target = progress.target.saturating_sub(1);
            }
        }
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(target: u32) -> (World, LevelProgress, Vocabulary, GameConfig, StdRng) {
        let config = GameConfig {
            spawn_interval_secs: 1.0,
            ..GameConfig::default()
        };
        (
            World::new(),
            LevelProgress::new(1, target, 0.0),
            Vocabulary::parse("go chan select defer").unwrap(),
            config,
            StdRng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_first_word_spawns_at_start() {
        let (mut world, mut progress, vocab, config, mut rng) = setup(5);
        assert_eq!(spawn_words(&mut world, &mut progress, &vocab, &config, 0.0, &mut rng), 1);
        assert_eq!(world.len(), 1);
        assert_eq!(spawn_words(&mut world, &mut progress, &vocab, &config, 0.5, &mut rng), 0);
        assert_eq!(spawn_words(&mut world, &mut progress, &vocab, &config, 1.0, &mut rng), 1);
        assert_eq!(progress.spawned, 2);
    }

    #[test]
    fn test_catches_up_and_stops_at_target() {
        let (mut world, mut progress, vocab, config, mut rng) = setup(3);
        assert_eq!(spawn_words(&mut world, &mut progress, &vocab, &config, 10.0, &mut rng), 3);
        assert_eq!(spawn_words(&mut world, &mut progress, &vocab, &config, 20.0, &mut rng), 0);
        assert_eq!(world.len(), 3);

        let mut times: Vec<f64> = world
            .query::<&Word>()
            .iter()
            .map(|(_, w)| w.spawned_at())
            .collect();
        times.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_words_fit_in_playfield() {
        let (mut world, mut progress, vocab, mut config, mut rng) = setup(50);
        config.playfield.width = 8;
        spawn_words(&mut world, &mut progress, &vocab, &config, 100.0, &mut rng);
        for (_, word) in world.query::<&Word>().iter() {
            assert!(word.column() >= 0);
            assert!(word.column() as usize + word.len() <= 8);
            assert_eq!(word.completed(), 0);
            assert!(vocab.words().iter().any(|w| w == word.text()));
        }
    }

    #[test]
    fn test_wide_word_starts_at_left_edge() {
        let (mut world, mut progress, _, mut config, mut rng) = setup(1);
        config.playfield.width = 3;
        let vocab = Vocabulary::parse("goroutine").unwrap();
        spawn_words(&mut world, &mut progress, &vocab, &config, 0.0, &mut rng);
        let columns: Vec<i32> = world.query::<&Word>().iter().map(|(_, w)| w.column()).collect();
        assert_eq!(columns, vec![0]);
    }
}
