//! Word frequency table built from corpus text.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::error::{Result, SpellerError};

/// Lowercase word counts derived from a corpus.
///
/// The table is immutable once built. Construction rejects an empty corpus,
/// so `total_frequency()` is always greater than zero and
/// [`probability`](Self::probability) is always well defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequencyTable {
    /// Words and their occurrence counts
    counts: AHashMap<String, u64>,
    /// Sum of all counts
    total_count: u64,
    /// Length in chars of the longest word
    max_word_len: usize,
}

impl WordFrequencyTable {
    /// Build a table from raw corpus text.
    ///
    /// Tokens are runs of word characters, lowercased.
    pub fn build(corpus_text: &str) -> Result<Self> {
        let tokenizer = WordTokenizer::new()?;
        Self::from_tokens(tokenizer.tokenize(corpus_text))
    }

    /// Build a table by counting already tokenized words.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        for token in tokens {
            *counts.entry(token.into()).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    /// Build a table from precomputed `(word, count)` pairs.
    ///
    /// Words are lowercased and counts for words that collide after
    /// lowercasing are summed. Zero counts are dropped.
    pub fn from_counts<I, S>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut table: AHashMap<String, u64> = AHashMap::new();
        for (word, count) in counts {
            if count == 0 {
                continue;
            }
            let word = word.into().to_lowercase();
            if word.is_empty() {
                continue;
            }
            *table.entry(word).or_insert(0) += count;
        }

        let total_count: u64 = table.values().sum();
        if total_count == 0 {
            return Err(SpellerError::empty_corpus(
                "corpus contains no words; word probabilities are undefined",
            ));
        }

        let max_word_len = table.keys().map(|w| w.chars().count()).max().unwrap_or(0);

        Ok(WordFrequencyTable {
            counts: table,
            total_count,
            max_word_len,
        })
    }

    /// Check if a word exists in the table.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Get the occurrence count of a word (0 when absent).
    pub fn frequency(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Get the probability of a word (frequency / total_count).
    pub fn probability(&self, word: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.frequency(word) as f64 / self.total_count as f64
    }

    /// Get the number of distinct words.
    pub fn word_count(&self) -> usize {
        self.counts.len()
    }

    /// Get the total occurrence count over all words.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Get the length in chars of the longest known word.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Iterate over `(word, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Get the most frequent words, ties ordered alphabetically.
    pub fn most_frequent_words(&self, limit: usize) -> Vec<(String, u64)> {
        let mut word_freq: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(word, freq)| (word.clone(), *freq))
            .collect();

        word_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        word_freq.truncate(limit);
        word_freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_corpus() {
        let corpus = "The quick brown fox jumps over the lazy dog. The dog was lazy.";
        let table = WordFrequencyTable::build(corpus).unwrap();

        assert!(table.contains("the"));
        assert!(table.contains("quick"));
        assert!(!table.contains("The"));
        assert_eq!(table.frequency("the"), 3);
        assert_eq!(table.frequency("dog"), 2);
        assert_eq!(table.frequency("lazy"), 2);
        assert_eq!(table.frequency("quick"), 1);
        assert_eq!(table.total_frequency(), 13);
        assert_eq!(table.word_count(), 9);
        assert_eq!(table.max_word_len(), 5);
    }

    #[test]
    fn test_probability() {
        let table = WordFrequencyTable::from_counts([("hello", 6), ("world", 4)]).unwrap();

        assert!((table.probability("hello") - 0.6).abs() < 1e-9);
        assert!((table.probability("world") - 0.4).abs() < 1e-9);
        assert_eq!(table.probability("nonexistent"), 0.0);
    }

    #[test]
    fn test_every_corpus_word_has_positive_probability() {
        let corpus = "a b c a b a";
        let table = WordFrequencyTable::build(corpus).unwrap();

        for word in ["a", "b", "c"] {
            assert!(table.contains(word));
            assert!(table.probability(word) > 0.0);
        }
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        assert!(matches!(
            WordFrequencyTable::build("  ... !!! "),
            Err(SpellerError::EmptyCorpus(_))
        ));
        assert!(matches!(
            WordFrequencyTable::from_counts([("zero", 0u64)]),
            Err(SpellerError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn test_from_counts_merges_case() {
        let table = WordFrequencyTable::from_counts([("Hello", 2), ("hello", 3)]).unwrap();
        assert_eq!(table.frequency("hello"), 5);
        assert_eq!(table.word_count(), 1);
    }

    #[test]
    fn test_most_frequent_words() {
        let table =
            WordFrequencyTable::from_counts([("common", 100), ("rare", 1), ("medium", 50), ("also", 50)])
                .unwrap();

        let top_words = table.most_frequent_words(3);
        assert_eq!(top_words.len(), 3);
        assert_eq!(top_words[0], ("common".to_string(), 100));
        assert_eq!(top_words[1], ("also".to_string(), 50));
        assert_eq!(top_words[2], ("medium".to_string(), 50));
    }

    #[test]
    fn test_iter_covers_all_words() {
        let table = WordFrequencyTable::build("x y y").unwrap();
        let mut pairs: Vec<(&str, u64)> = table.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("x", 1), ("y", 2)]);
    }
}
