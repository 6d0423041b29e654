//! Candidate generation by bounded character edits.
//!
//! The default edit model only inserts characters from a small vowel-like
//! alphabet (`aiueon`), up to three times. A word `w` is a candidate for an
//! input `x` when `w` is known and reachable from `x` by at most
//! `max_edits` applications of the single-edit operation.
//!
//! Two strategies produce the same membership:
//!
//! - **insertion scan**: with insertions only, `w` is reachable from `x` in
//!   exactly `k` steps iff `w` is `k` chars longer than `x` and `x` embeds in
//!   `w` as a subsequence whose skipped chars all belong to the alphabet.
//!   Known words are bucketed by length and checked directly, so the
//!   unfiltered edit space is never built.
//! - **expansion**: any other operation set composes the one-edit step level
//!   by level, deduplicating each level and pruning strings too long to ever
//!   shrink back to a known word.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellerError};
use crate::spelling::cache::{CacheStats, LruCache};
use crate::spelling::dictionary::WordFrequencyTable;

/// Insertion alphabet of the default edit model.
pub const DEFAULT_ALPHABET: &str = "aiueon";

/// Default edit depth.
pub const DEFAULT_MAX_EDITS: usize = 3;

/// Default number of memoized candidate sets.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Deepest edit bound accepted by [`CandidateConfig::validate`].
pub const MAX_EDITS_LIMIT: usize = 4;

/// A set of candidate words, ordered lexicographically.
pub type CandidateSet = BTreeSet<String>;

/// Which single-edit operations make up one edit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOperations {
    pub insert: bool,
    pub delete: bool,
    pub substitute: bool,
    pub transpose: bool,
}

impl EditOperations {
    /// Character insertion only.
    pub fn insertion_only() -> Self {
        EditOperations {
            insert: true,
            delete: false,
            substitute: false,
            transpose: false,
        }
    }

    /// Insertion, deletion, substitution and transposition.
    pub fn full() -> Self {
        EditOperations {
            insert: true,
            delete: true,
            substitute: true,
            transpose: true,
        }
    }

    /// Whether insertion is the only enabled operation.
    pub fn is_insertion_only(&self) -> bool {
        self.insert && !self.delete && !self.substitute && !self.transpose
    }

    /// Whether no operation is enabled.
    pub fn is_empty(&self) -> bool {
        !(self.insert || self.delete || self.substitute || self.transpose)
    }
}

impl Default for EditOperations {
    fn default() -> Self {
        Self::insertion_only()
    }
}

/// Configuration for candidate generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Maximum number of edit steps.
    pub max_edits: usize,
    /// Characters used by insertion and substitution.
    pub alphabet: String,
    /// Operations making up a single edit step.
    pub operations: EditOperations,
    /// Number of memoized candidate sets (0 disables the cache).
    pub cache_capacity: usize,
}

impl CandidateConfig {
    /// Check the configuration for values the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_edits > MAX_EDITS_LIMIT {
            return Err(SpellerError::invalid_config(format!(
                "max_edits is {}, the limit is {MAX_EDITS_LIMIT}",
                self.max_edits
            )));
        }
        if self.operations.is_empty() {
            return Err(SpellerError::invalid_config(
                "at least one edit operation must be enabled",
            ));
        }
        if (self.operations.insert || self.operations.substitute) && self.alphabet.is_empty() {
            return Err(SpellerError::invalid_config(
                "insertion and substitution need a non-empty alphabet",
            ));
        }
        Ok(())
    }
}

impl Default for CandidateConfig {
    fn default() -> Self {
        CandidateConfig {
            max_edits: DEFAULT_MAX_EDITS,
            alphabet: DEFAULT_ALPHABET.to_string(),
            operations: EditOperations::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Produces the known words reachable from an input word.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    dictionary: Arc<WordFrequencyTable>,
    config: CandidateConfig,
    alphabet: Vec<char>,
    /// Known words bucketed by length in chars, each bucket sorted.
    words_by_len: Vec<Vec<String>>,
    cache: LruCache<String, Arc<CandidateSet>>,
}

impl CandidateGenerator {
    /// Create a generator over `dictionary`.
    pub fn new(dictionary: Arc<WordFrequencyTable>, config: CandidateConfig) -> Result<Self> {
        config.validate()?;

        let mut alphabet: Vec<char> = config.alphabet.chars().collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        let mut words_by_len: Vec<Vec<String>> = vec![Vec::new(); dictionary.max_word_len() + 1];
        for (word, _) in dictionary.iter() {
            let len = word.chars().count();
            if len >= words_by_len.len() {
                words_by_len.resize(len + 1, Vec::new());
            }
            words_by_len[len].push(word.to_string());
        }
        for bucket in &mut words_by_len {
            bucket.sort_unstable();
        }

        let cache = LruCache::new(config.cache_capacity);

        Ok(CandidateGenerator {
            dictionary,
            config,
            alphabet,
            words_by_len,
            cache,
        })
    }

    /// Get the candidate set for `word`, memoized by the exact input string.
    ///
    /// The set always contains `word` itself.
    pub fn generate(&mut self, word: &str) -> Arc<CandidateSet> {
        let key = word.to_string();
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit);
        }

        let candidates = Arc::new(self.compute(word));
        debug!("generated {} candidates for {word:?}", candidates.len());
        self.cache.insert(key, Arc::clone(&candidates));
        candidates
    }

    /// Compute the candidate set without consulting the cache.
    pub fn compute(&self, word: &str) -> CandidateSet {
        let mut candidates = CandidateSet::new();
        candidates.insert(word.to_string());

        if self.config.operations.is_insertion_only() {
            self.scan_insertions(word, &mut candidates);
        } else {
            self.expand(word, &mut candidates);
        }
        candidates
    }

    /// Known words reachable by exactly `depth` edit steps, found by
    /// literal expansion. Used to cross-check the insertion scan.
    pub fn known_at_depth(&self, word: &str, depth: usize) -> CandidateSet {
        let mut frontier: AHashSet<String> = AHashSet::new();
        frontier.insert(word.to_string());
        for level in 1..=depth {
            frontier = self.expand_level(&frontier, depth - level);
        }
        frontier
            .into_iter()
            .filter(|w| self.dictionary.contains(w))
            .collect()
    }

    /// The generator configuration.
    pub fn config(&self) -> &CandidateConfig {
        &self.config
    }

    /// The table candidates are checked against.
    pub fn dictionary(&self) -> &WordFrequencyTable {
        &self.dictionary
    }

    /// Candidate cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every memoized candidate set.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn scan_insertions(&self, word: &str, candidates: &mut CandidateSet) {
        let base_len = word.chars().count();
        for depth in 1..=self.config.max_edits {
            let Some(bucket) = self.words_by_len.get(base_len + depth) else {
                break;
            };
            candidates.extend(
                bucket
                    .iter()
                    .filter(|known| self.is_insertion_of(word, known))
                    .cloned(),
            );
        }
    }

    /// Whether `target` is `base` with alphabet characters inserted.
    ///
    /// Matching each base char at its earliest occurrence is safe: if that
    /// occurrence could also be skipped, it is an alphabet char, and so is
    /// the identical char a later match would have used.
    fn is_insertion_of(&self, base: &str, target: &str) -> bool {
        let mut base_chars = base.chars().peekable();
        for c in target.chars() {
            if base_chars.peek() == Some(&c) {
                base_chars.next();
            } else if self.alphabet.binary_search(&c).is_err() {
                return false;
            }
        }
        base_chars.peek().is_none()
    }

    fn expand(&self, word: &str, candidates: &mut CandidateSet) {
        let mut frontier: AHashSet<String> = AHashSet::new();
        frontier.insert(word.to_string());

        for depth in 1..=self.config.max_edits {
            frontier = self.expand_level(&frontier, self.config.max_edits - depth);
            if frontier.is_empty() {
                break;
            }
            candidates.extend(
                frontier
                    .iter()
                    .filter(|w| self.dictionary.contains(w))
                    .cloned(),
            );
        }
    }

    /// Apply one edit step to every string of `frontier`.
    ///
    /// Strings that cannot get back under the longest known word within
    /// `remaining` further steps are dropped.
    fn expand_level(&self, frontier: &AHashSet<String>, remaining: usize) -> AHashSet<String> {
        let shrink = if self.config.operations.delete {
            remaining
        } else {
            0
        };
        let max_len = self.dictionary.max_word_len() + shrink;

        let mut next = AHashSet::new();
        for s in frontier {
            for edit in self.edits1(s, max_len) {
                if edit.chars().count() <= max_len {
                    next.insert(edit);
                }
            }
        }
        next
    }

    /// All strings one edit step away from `word`.
    ///
    /// Insertions are skipped when they would exceed `max_len`.
    fn edits1(&self, word: &str, max_len: usize) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let ops = self.config.operations;
        let insert = ops.insert && chars.len() < max_len;
        let mut edits = Vec::new();

        for i in 0..=chars.len() {
            let (left, right) = chars.split_at(i);

            if insert {
                for &c in &self.alphabet {
                    edits.push(join(left, Some(c), right));
                }
            }
            if ops.delete && !right.is_empty() {
                edits.push(join(left, None, &right[1..]));
            }
            if ops.substitute && !right.is_empty() {
                for &c in &self.alphabet {
                    if c != right[0] {
                        edits.push(join(left, Some(c), &right[1..]));
                    }
                }
            }
            if ops.transpose && right.len() > 1 && right[0] != right[1] {
                let mut swapped: String = left.iter().collect();
                swapped.push(right[1]);
                swapped.push(right[0]);
                swapped.extend(&right[2..]);
                edits.push(swapped);
            }
        }
        edits
    }
}

fn join(left: &[char], middle: Option<char>, right: &[char]) -> String {
    let mut s = String::with_capacity(left.len() + right.len() + 1);
    s.extend(left);
    if let Some(c) = middle {
        s.push(c);
    }
    s.extend(right);
    s
}
