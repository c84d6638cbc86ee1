//! Error types.
//!
//! Only startup problems and programming mistakes are errors. Player actions
//! that cannot be honoured (bad shop index, not enough money, a wrong key)
//! are reported as outcome values by the engine instead.

use thiserror::Error;

/// A word could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("cannot spawn a word with no characters")]
    Empty,
}

/// The word list could not be loaded.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list contains no words")]
    Empty,
    #[error("word {word:?} contains a control character and cannot be typed")]
    Unprintable { word: String },
}

/// The game configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
