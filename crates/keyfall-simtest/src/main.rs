//! Keyfall Headless Session Harness
//!
//! Plays scripted games against the engine and checks that the rules hold
//! every frame. Runs entirely in-process with no terminal UI.
//!
//! Usage:
//!   cargo run -p keyfall-simtest
//!   cargo run -p keyfall-simtest -- --seed 7 --levels 20 --verbose
//!   cargo run -p keyfall-simtest -- --json > report.json

mod bot;

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keyfall_core::prelude::*;
use keyfall_logic::constants::progression;
use keyfall_logic::hazard;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::bot::{shop_greedily, Typist};

// ── Word list (same file the game ships with) ───────────────────────────
const WORDS: &str = include_str!("../../../data/words.txt");

const FRAME: f64 = 1.0 / 30.0;
/// A level still running after this long is reported as stuck.
const MAX_LEVEL_SECS: f64 = 900.0;

/// Command-line arguments for a headless session.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Seed for every random choice in the session.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of levels to play.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,
    /// Typing speed of the scripted player.
    #[arg(long, value_name = "CHARS_PER_SEC", default_value_t = 3.0)]
    cps: f64,
    /// Make every Nth key a typo (0 for none).
    #[arg(long, value_name = "N", default_value_t = 25)]
    typo_every: u32,
    /// Game configuration JSON; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Whitespace-delimited word list; the bundled list is used when omitted.
    #[arg(long, value_name = "PATH")]
    words: Option<PathBuf>,
    /// Print every check, not only failures.
    #[arg(long)]
    verbose: bool,
    /// Print the session report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

/// One level of the scripted session.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct LevelRecord {
    number: u32,
    outcome: Option<LevelOutcome>,
    duration_secs: f64,
    cleared_by_player: u32,
    cleared_by_helpers: u32,
    collections: u32,
    helpers_owned: usize,
    dollars: u64,
    lives: u8,
}

#[derive(Debug, Default, Serialize)]
struct SessionReport {
    seed: u64,
    levels: Vec<LevelRecord>,
    game_overs: u32,
    purchases: u32,
    typos: u32,
    violations: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HarnessReport<'a> {
    session: &'a SessionReport,
    results: &'a [TestResult],
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_vocabulary(path: Option<&PathBuf>) -> Result<Vocabulary> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening word list {}", path.display()))?;
            Vocabulary::from_reader(file)
                .with_context(|| format!("reading word list {}", path.display()))
        }
        None => Vocabulary::parse(WORDS).context("parsing bundled word list"),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let vocabulary = load_vocabulary(args.words.as_ref())?;
    let config = load_config(args.config.as_ref())?;
    log::info!(
        "session: seed {}, {} levels, {} words",
        args.seed,
        args.levels,
        vocabulary.len()
    );

    let mut results = Vec::new();

    // 1. Inputs
    results.extend(validate_inputs(&vocabulary, &config));

    // 2. Scripted rule scenarios
    results.extend(validate_scenarios());

    // 3. Hazard odds sweep
    results.extend(validate_hazard());

    // 4. Full session with per-frame invariant checks
    let session = run_session(&args, &config, &vocabulary)?;
    results.extend(validate_session(&args, &session));

    // 5. Same seed, same game
    let replay = run_session(&args, &config, &vocabulary)?;
    results.push(TestResult::check(
        "session_deterministic",
        replay.levels == session.levels,
        format!("{} levels replayed with seed {}", replay.levels.len(), args.seed),
    ));

    let failed = results.iter().filter(|r| !r.passed).count();
    if args.json {
        let report = HarnessReport {
            session: &session,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&session, &results, args.verbose);
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(session: &SessionReport, results: &[TestResult], verbose: bool) {
    println!("=== Keyfall Session Harness ===\n");
    println!("--- Levels ---");
    for level in &session.levels {
        let outcome = match level.outcome {
            Some(LevelOutcome::Won { reward }) => format!("won ${}", reward),
            Some(LevelOutcome::Lost { lives_remaining }) => {
                format!("lost ({} lives left)", lives_remaining)
            }
            Some(LevelOutcome::GameOver) => "game over".into(),
            None => "stuck".into(),
        };
        println!(
            "  level {:>2}: {:<18} {:>6.1}s  player {:>2}  helpers {:>2} ({} owned)  gc {:>2}  ${}",
            level.number,
            outcome,
            level.duration_secs,
            level.cleared_by_player,
            level.cleared_by_helpers,
            level.helpers_owned,
            level.collections,
            level.dollars
        );
    }
    println!(
        "  {} purchases, {} typos, {} game overs",
        session.purchases, session.typos, session.game_overs
    );

    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }
    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
}

// ── 1. Inputs ───────────────────────────────────────────────────────────

fn validate_inputs(vocabulary: &Vocabulary, config: &GameConfig) -> Vec<TestResult> {
    let mut results = Vec::new();

    results.push(TestResult::check(
        "config_valid",
        config.validate().is_ok(),
        format!(
            "{}x{} field, {} words per level",
            config.playfield.width, config.playfield.height, config.words_per_level
        ),
    ));

    let width = usize::from(config.playfield.width);
    let too_wide: Vec<&String> = vocabulary
        .words()
        .iter()
        .filter(|w| w.chars().count() > width)
        .collect();
    results.push(TestResult::check(
        "words_fit_playfield",
        too_wide.is_empty(),
        if too_wide.is_empty() {
            format!("{} words, longest {}", vocabulary.len(), vocabulary.longest())
        } else {
            format!("{} words wider than {}: {:?}", too_wide.len(), width, too_wide)
        },
    ));

    results
}

// ── 2. Scenarios ────────────────────────────────────────────────────────

fn scenario_engine(words: &str, words_per_level: u32) -> Option<GameEngine> {
    let config = GameConfig {
        words_per_level,
        ..GameConfig::default()
    };
    let vocabulary = Vocabulary::parse(words).ok()?;
    GameEngine::new(config, vocabulary, 0).ok()
}

fn validate_scenarios() -> Vec<TestResult> {
    let mut results = Vec::new();

    // Typing a word in order completes it for the player.
    if let Some(mut engine) = scenario_engine("gopher", 1) {
        engine.start_level(0.0);
        engine.tick(0.0);
        for ch in "gopher".chars() {
            engine.on_keystroke(ch);
        }
        let words = engine.current_words();
        let done = words
            .first()
            .map(|w| w.completed == 6 && w.claimant == Claimant::Player)
            .unwrap_or(false);
        let report = engine.tick(FRAME);
        results.push(TestResult::check(
            "scenario_type_gopher",
            done && matches!(report.outcome, Some(LevelOutcome::Won { .. })),
            format!("outcome {:?}", report.outcome),
        ));
    }

    // A typo keeps progress and pushes the word down.
    if let Some(mut engine) = scenario_engine("gopher", 1) {
        engine.start_level(0.0);
        engine.tick(0.0);
        engine.on_keystroke('g');
        let typo = engine.on_keystroke('x');
        engine.tick(0.1);
        let word = engine.current_words().into_iter().next();
        let ok = typo == KeyResult::Typed(Keystroke::Penalized)
            && word.as_ref().map(|w| w.completed == 1 && w.row >= 2).unwrap_or(false);
        results.push(TestResult::check(
            "scenario_typo_penalty",
            ok,
            format!("{:?}, word {:?}", typo, word),
        ));
    }

    // Exactly enough money buys a helper.
    if let Some(mut engine) = scenario_engine("gopher", 1) {
        engine.start_level(0.0);
        engine.tick(100.0);
        let mut stats = engine.current_stats().clone();
        stats.dollars = 1000;
        engine.set_stats(stats);
        engine.enter_shop();
        let result = engine.purchase(0);
        results.push(TestResult::check(
            "scenario_exact_funds",
            result
                == Purchase::Accepted {
                    kind: ItemKind::Helper,
                    price: 1000,
                    id: Some(1),
                }
                && engine.current_stats().dollars == 0
                && engine.owned_helpers() == 1,
            format!("{:?}", result),
        ));

        // The last life ends the run; the next game starts without helpers.
        engine.exit_shop(100.0);
        let mut stats = engine.current_stats().clone();
        stats.lives = 1;
        engine.set_stats(stats);
        let report = engine.tick(200.0);
        let over = report.outcome == Some(LevelOutcome::GameOver);
        let held = engine.owned_helpers();
        engine.start_level(201.0);
        results.push(TestResult::check(
            "scenario_game_over",
            over && held == 1 && engine.owned_helpers() == 0
                && engine.current_stats().lives == progression::STARTING_LIVES,
            format!("{:?}, helpers {} -> {}", report.outcome, held, engine.owned_helpers()),
        ));
    }

    results
}

// ── 3. Hazard ───────────────────────────────────────────────────────────

fn validate_hazard() -> Vec<TestResult> {
    let mut results = Vec::new();

    let empty_odds: Vec<f64> = (0..50).map(|t| hazard::collection_odds(0, t)).collect();
    results.push(TestResult::check(
        "hazard_no_garbage_no_fire",
        empty_odds.iter().all(|&p| p == 0.0),
        "odds with zero garbage are zero for every threshold",
    ));

    let mut monotone = true;
    for garbage in 1..200 {
        for threshold in 0..60 {
            if hazard::collection_odds(garbage, threshold + 1)
                > hazard::collection_odds(garbage, threshold)
            {
                monotone = false;
            }
        }
    }
    results.push(TestResult::check(
        "hazard_threshold_lowers_odds",
        monotone,
        "odds never rise with the threshold",
    ));

    results
}

// ── 4. Session ──────────────────────────────────────────────────────────

fn run_session(args: &CliArgs, config: &GameConfig, vocabulary: &Vocabulary) -> Result<SessionReport> {
    let mut engine = GameEngine::new(config.clone(), vocabulary.clone(), args.seed)
        .context("creating engine")?;
    let mut typist = Typist::new(args.cps, args.typo_every);
    let mut report = SessionReport {
        seed: args.seed,
        ..SessionReport::default()
    };

    let mut now = 0.0;
    engine.start_level(now);
    for _ in 0..args.levels {
        let collections_before = engine.collections();
        let record = play_level(&mut engine, &mut typist, &mut now, &mut report.violations);
        log::debug!("level {} finished: {:?}", record.number, record.outcome);
        let outcome = record.outcome;
        report.levels.push(LevelRecord {
            collections: engine.collections() - collections_before,
            ..record
        });

        match outcome {
            None => break,
            Some(LevelOutcome::GameOver) => {
                report.game_overs += 1;
                engine.start_level(now);
            }
            Some(_) => {
                engine.enter_shop();
                match shop_greedily(&mut engine) {
                    Ok(bought) => report.purchases += bought.len() as u32,
                    Err(problem) => report.violations.push(problem),
                }
                engine.exit_shop(now);
            }
        }
        typist.reset();
    }
    report.typos = typist.typos;
    Ok(report)
}

/// Tick one level to its end, checking invariants every frame.
fn play_level(
    engine: &mut GameEngine,
    typist: &mut Typist,
    now: &mut f64,
    violations: &mut Vec<String>,
) -> LevelRecord {
    let started = *now;
    let mut claimants: HashMap<u64, Claimant> = HashMap::new();
    let mut outcome = None;

    while outcome.is_none() && *now - started < MAX_LEVEL_SECS {
        *now += FRAME;
        typist.play(engine, FRAME);
        let report = engine.tick(*now);
        outcome = report.outcome;
        check_frame(engine, &mut claimants, violations);
    }

    let progress = engine.level_progress();
    let stats = engine.current_stats();
    LevelRecord {
        number: progress.number,
        outcome,
        duration_secs: *now - started,
        cleared_by_player: progress.cleared_by_player,
        cleared_by_helpers: progress.cleared_by_helpers,
        collections: 0,
        helpers_owned: engine.owned_helpers(),
        dollars: stats.dollars,
        lives: stats.lives,
    }
}

fn check_frame(
    engine: &GameEngine,
    claimants: &mut HashMap<u64, Claimant>,
    violations: &mut Vec<String>,
) {
    for word in engine.current_words() {
        if word.completed > word.text.chars().count() {
            violations.push(format!("{:?} overran its text", word));
        }
        if word.completed > 0 && !word.claimant.is_claimed() {
            violations.push(format!("{:?} progressed without a claimant", word));
        }
        if word.claimant.is_claimed() {
            let first = *claimants.entry(word.id).or_insert(word.claimant);
            if first != word.claimant {
                violations.push(format!(
                    "{} changed claimant {:?} -> {:?}",
                    word.text, first, word.claimant
                ));
            }
        }
    }

    let stats = engine.current_stats();
    if stats.dollars > stats.total_earned {
        violations.push(format!(
            "balance {} exceeds total earned {}",
            stats.dollars, stats.total_earned
        ));
    }
    if stats.lives > progression::STARTING_LIVES {
        violations.push(format!("{} lives", stats.lives));
    }

    let progress = engine.level_progress();
    if progress.cleared() > progress.spawned || progress.spawned > progress.target {
        violations.push(format!("inconsistent progress {:?}", progress));
    }
}

fn validate_session(args: &CliArgs, session: &SessionReport) -> Vec<TestResult> {
    let mut results = Vec::new();

    let stuck = session.levels.iter().filter(|l| l.outcome.is_none()).count();
    results.push(TestResult::check(
        "levels_terminate",
        stuck == 0 && session.levels.len() == args.levels as usize,
        format!(
            "{} of {} levels finished",
            session.levels.len() - stuck,
            args.levels
        ),
    ));

    results.push(TestResult::check(
        "frame_invariants",
        session.violations.is_empty(),
        match session.violations.first() {
            None => "no violations".to_string(),
            Some(first) => format!("{} violations, first: {}", session.violations.len(), first),
        },
    ));

    let won = session
        .levels
        .iter()
        .filter(|l| matches!(l.outcome, Some(LevelOutcome::Won { .. })))
        .count();
    results.push(TestResult::check(
        "session_summary",
        true,
        format!(
            "{} won, {} purchases, {} game overs",
            won, session.purchases, session.game_overs
        ),
    ));

    results
}
