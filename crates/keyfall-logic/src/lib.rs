//! Pure game rules for keyfall.
//!
//! This crate contains the parts of the game that need neither a clock nor a
//! random source: the falling word state machine, the player progression
//! record, shop pricing, garbage-collection odds, configuration and the
//! vocabulary loader. Time is always passed in as seconds and randomness is
//! left to the engine, so everything here is deterministic and unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable gameplay parameters, JSON loading and validation |
//! | [`constants`] | Fixed rule constants (lives, prices, upgrade steps) |
//! | [`economy`] | Shop prices and level rewards as pure functions |
//! | [`error`] | Error types for startup failures and invalid words |
//! | [`hazard`] | Garbage-collection firing rule, odds and pause length |
//! | [`stats`] | Per-run progression record and level outcome transitions |
//! | [`vocabulary`] | Whitespace-delimited word list parsing |
//! | [`word`] | A falling word with per-character completion and claim state |

pub mod config;
pub mod constants;
pub mod economy;
pub mod error;
pub mod hazard;
pub mod stats;
pub mod vocabulary;
pub mod word;
