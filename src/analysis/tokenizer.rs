//! Tokenizer implementations for corpus text.
//!
//! # Examples
//!
//! ```
//! use ngram_speller::analysis::tokenizer::{Tokenizer, WordTokenizer};
//!
//! let tokenizer = WordTokenizer::new().unwrap();
//! let tokens = tokenizer.tokenize("The Cat, the HAT.");
//! assert_eq!(tokens, vec!["the", "cat", "the", "hat"]);
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, SpellerError};

/// Trait for tokenizers that convert text into lowercase words.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into an ordered list of words.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A regex-based tokenizer that extracts runs of word characters.
///
/// The text is lowercased before matching, so every token is lowercase.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Arc<Regex>,
}

impl WordTokenizer {
    /// Create a new word tokenizer with the default `\w+` pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a new word tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SpellerError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(WordTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new().expect("Default regex pattern should be valid")
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|mat| mat.as_str().to_string())
            .collect()
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
