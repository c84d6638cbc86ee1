//! Word list loading.
//!
//! A vocabulary is any whitespace-delimited text. The game cannot run without
//! at least one word, so an empty source is an error rather than an empty list.

use std::io::Read;

use crate::error::VocabularyError;

/// Non-empty list of candidate words, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Split `text` on whitespace.
    pub fn parse(text: &str) -> Result<Self, VocabularyError> {
        Self::from_words(text.split_whitespace())
    }

    /// Read everything from `reader` and parse it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, VocabularyError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Build from already-split words. Blank entries are dropped; a word with
    /// a control character rejects the whole list.
    pub fn from_words<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(VocabularyError::Empty);
        }
        if let Some(word) = words.iter().find(|w| w.chars().any(char::is_control)) {
            return Err(VocabularyError::Unprintable { word: word.clone() });
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Length in characters of the longest word.
    pub fn longest(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0)
    }
}
