//! Sentence normalization for correction input.

use super::tokenizer::Tokenizer;

/// Turns a raw sentence into the token sequence the corrector works on.
///
/// Every ASCII punctuation character is replaced by whitespace, the text is
/// lowercased and split on whitespace, and empty tokens are dropped.
#[derive(Clone, Debug, Default)]
pub struct SentenceNormalizer;

impl SentenceNormalizer {
    /// Create a new sentence normalizer.
    pub fn new() -> Self {
        SentenceNormalizer
    }

    /// Normalize a sentence into lowercase, punctuation-free tokens.
    pub fn normalize(&self, sentence: &str) -> Vec<String> {
        let stripped: String = sentence
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();

        stripped
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Tokenizer for SentenceNormalizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
    }

    fn name(&self) -> &'static str {
        "sentence"
    }
}
