use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use keyfall_core::prelude::*;

const FRAME: f64 = 1.0 / 30.0;
const START: f64 = 1010.0;

/// A level with eight helpers and two hundred words already on screen.
fn busy_engine() -> GameEngine {
    let config = GameConfig {
        words_per_level: 500,
        spawn_interval_secs: 0.05,
        fall_speed: 0.5,
        ..GameConfig::default()
    };
    let vocabulary =
        Vocabulary::parse("go chan defer select range struct interface goroutine").unwrap();
    let mut engine = GameEngine::new(config, vocabulary, 99).unwrap();

    // Lose a level to open the shop, then buy the helpers.
    engine.start_level(0.0);
    engine.tick(1000.0);
    let mut stats = engine.current_stats().clone();
    stats.dollars = 1_000_000;
    engine.set_stats(stats);
    engine.enter_shop();
    for _ in 0..8 {
        engine.purchase(0);
    }
    engine.exit_shop(1000.0);
    engine.tick(START);
    engine
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("ten_seconds_busy_level", |b| {
        b.iter_batched(
            busy_engine,
            |mut engine| {
                for frame in 1..=300u32 {
                    black_box(engine.tick(START + f64::from(frame) * FRAME));
                }
                engine
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("current_words", |b| {
        let engine = busy_engine();
        b.iter(|| black_box(engine.current_words()))
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
