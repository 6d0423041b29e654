//! Trigram language model trained on corpus text.
//!
//! Counts are collected within sentences: the text is cut at `.`, `!`, `?`
//! and line breaks, so no n-gram spans two sentences. Probabilities use
//! add-k smoothing over the training vocabulary:
//!
//! ```text
//! P(w)     = (c(w) + k)    / (N + k·V)
//! P(w | h) = (c(h, w) + k) / (c(h) + k·V)
//! ```
//!
//! where `c(h)` counts how often `h` was followed by another word.
//! A sequence is scored by the chain rule with a history of at most two
//! words.

use ahash::AHashMap;
use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::LanguageModel;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::error::{Result, SpellerError};

/// Default add-k smoothing constant (Laplace).
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Configuration for [`NgramLanguageModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageModelConfig {
    /// Add-k smoothing constant. Zero gives unsmoothed maximum likelihood.
    pub smoothing: f64,
}

impl LanguageModelConfig {
    /// Check that the smoothing constant is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing < 0.0 {
            return Err(SpellerError::invalid_config(format!(
                "smoothing must be a finite non-negative number, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        LanguageModelConfig {
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

/// Unigram, bigram and trigram counts with add-k smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramLanguageModel {
    unigrams: AHashMap<String, u64>,
    bigrams: AHashMap<(String, String), u64>,
    trigrams: AHashMap<(String, String, String), u64>,
    /// How often each word was followed by another word.
    bigram_histories: AHashMap<String, u64>,
    /// How often each word pair was followed by another word.
    trigram_histories: AHashMap<(String, String), u64>,
    total_words: u64,
    smoothing: f64,
}

impl NgramLanguageModel {
    /// Create an untrained model.
    pub fn new(config: LanguageModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(NgramLanguageModel {
            unigrams: AHashMap::new(),
            bigrams: AHashMap::new(),
            trigrams: AHashMap::new(),
            bigram_histories: AHashMap::new(),
            trigram_histories: AHashMap::new(),
            total_words: 0,
            smoothing: config.smoothing,
        })
    }

    /// Train a model on corpus text, failing if the text has no words.
    pub fn from_corpus(text: &str, config: LanguageModelConfig) -> Result<Self> {
        let mut model = Self::new(config)?;
        model.train(text)?;
        if model.total_words == 0 {
            return Err(SpellerError::empty_corpus(
                "language model training text contains no words",
            ));
        }
        info!(
            "trained language model: {} words, {} unigrams, {} bigrams, {} trigrams",
            model.total_words,
            model.unigrams.len(),
            model.bigrams.len(),
            model.trigrams.len()
        );
        Ok(model)
    }

    /// Add the n-gram counts of `text` to the model.
    pub fn train(&mut self, text: &str) -> Result<()> {
        let boundaries = Regex::new(r"[.!?\r\n]+")
            .map_err(|e| SpellerError::analysis(format!("Invalid sentence pattern: {e}")))?;
        let tokenizer = WordTokenizer::new()?;

        for sentence in boundaries.split(text) {
            let words = tokenizer.tokenize(sentence);
            self.train_sentence(&words);
        }
        Ok(())
    }

    /// Add the n-gram counts of one tokenized sentence.
    pub fn train_sentence(&mut self, words: &[String]) {
        for (i, word) in words.iter().enumerate() {
            *self.unigrams.entry(word.clone()).or_insert(0) += 1;
            self.total_words += 1;

            if i >= 1 {
                let prev = &words[i - 1];
                *self
                    .bigrams
                    .entry((prev.clone(), word.clone()))
                    .or_insert(0) += 1;
                *self.bigram_histories.entry(prev.clone()).or_insert(0) += 1;
            }

            if i >= 2 {
                let prev2 = &words[i - 2];
                let prev1 = &words[i - 1];
                *self
                    .trigrams
                    .entry((prev2.clone(), prev1.clone(), word.clone()))
                    .or_insert(0) += 1;
                *self
                    .trigram_histories
                    .entry((prev2.clone(), prev1.clone()))
                    .or_insert(0) += 1;
            }
        }
    }

    /// Number of distinct training words.
    pub fn vocabulary_size(&self) -> usize {
        self.unigrams.len()
    }

    /// Number of training tokens.
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Number of distinct bigrams.
    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    /// Number of distinct trigrams.
    pub fn trigram_count(&self) -> usize {
        self.trigrams.len()
    }

    /// The add-k smoothing constant.
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// `P(word | prev)`.
    pub fn bigram_prob(&self, prev: &str, word: &str) -> f64 {
        let joint = self
            .bigrams
            .get(&(prev.to_string(), word.to_string()))
            .copied()
            .unwrap_or(0);
        let history = self.bigram_histories.get(prev).copied().unwrap_or(0);
        self.smoothed(joint, history)
    }

    /// `P(word | prev2 prev1)`.
    pub fn trigram_prob(&self, prev2: &str, prev1: &str, word: &str) -> f64 {
        let joint = self
            .trigrams
            .get(&(prev2.to_string(), prev1.to_string(), word.to_string()))
            .copied()
            .unwrap_or(0);
        let history = self
            .trigram_histories
            .get(&(prev2.to_string(), prev1.to_string()))
            .copied()
            .unwrap_or(0);
        self.smoothed(joint, history)
    }

    fn smoothed(&self, count: u64, total: u64) -> f64 {
        let denominator = total as f64 + self.smoothing * self.unigrams.len() as f64;
        if denominator <= 0.0 {
            return 0.0;
        }
        (count as f64 + self.smoothing) / denominator
    }
}

impl LanguageModel for NgramLanguageModel {
    fn unigram_prob(&self, word: &str) -> f64 {
        let count = self.unigrams.get(word).copied().unwrap_or(0);
        self.smoothed(count, self.total_words)
    }

    /// Chain-rule probability; the empty sequence has probability 1.
    fn sentence_prob(&self, words: &[&str]) -> f64 {
        let mut prob = 1.0;
        for (i, word) in words.iter().enumerate() {
            prob *= match i {
                0 => self.unigram_prob(word),
                1 => self.bigram_prob(words[0], word),
                _ => self.trigram_prob(words[i - 2], words[i - 1], word),
            };
        }
        prob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mle() -> LanguageModelConfig {
        LanguageModelConfig { smoothing: 0.0 }
    }

    #[test]
    fn test_counts_stay_within_sentences() {
        let model = NgramLanguageModel::from_corpus("the cat sat. the dog ran!", mle()).unwrap();

        assert_eq!(model.total_words(), 6);
        assert_eq!(model.vocabulary_size(), 5);
        assert_eq!(model.bigram_count(), 4);
        assert_eq!(model.trigram_count(), 2);
        // "sat the" crosses a sentence boundary.
        assert_eq!(model.bigram_prob("sat", "the"), 0.0);
    }

    #[test]
    fn test_maximum_likelihood_estimates() {
        let model =
            NgramLanguageModel::from_corpus("the cat sat\nthe cat ran\nthe dog sat", mle())
                .unwrap();

        assert!((model.unigram_prob("the") - 3.0 / 9.0).abs() < 1e-12);
        assert!((model.bigram_prob("the", "cat") - 2.0 / 3.0).abs() < 1e-12);
        assert!((model.trigram_prob("the", "cat", "sat") - 0.5).abs() < 1e-12);

        let expected = (3.0 / 9.0) * (2.0 / 3.0) * 0.5;
        assert!((model.sentence_prob(&["the", "cat", "sat"]) - expected).abs() < 1e-12);
        assert_eq!(model.sentence_prob(&["cat", "the"]), 0.0);
    }

    #[test]
    fn test_laplace_smoothing() {
        let model = NgramLanguageModel::from_corpus("a b\na c", LanguageModelConfig::default())
            .unwrap();

        // N = 4, V = 3
        assert!((model.unigram_prob("a") - 3.0 / 7.0).abs() < 1e-12);
        assert!((model.unigram_prob("zzz") - 1.0 / 7.0).abs() < 1e-12);
        // c(a) as history = 2
        assert!((model.bigram_prob("a", "b") - 2.0 / 5.0).abs() < 1e-12);
        assert!((model.bigram_prob("b", "a") - 1.0 / 3.0).abs() < 1e-12);
        assert!(model.sentence_prob(&["zzz", "yyy", "xxx"]) > 0.0);
    }

    #[test]
    fn test_empty_sequence_and_empty_corpus() {
        let model = NgramLanguageModel::from_corpus("one two", mle()).unwrap();
        assert_eq!(model.sentence_prob(&[]), 1.0);

        assert!(matches!(
            NgramLanguageModel::from_corpus(" . ! ", mle()),
            Err(SpellerError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn test_invalid_smoothing() {
        for smoothing in [-1.0, f64::NAN, f64::INFINITY] {
            let config = LanguageModelConfig { smoothing };
            assert!(NgramLanguageModel::new(config).is_err());
        }
    }
}
