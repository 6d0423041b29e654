//! Sentence corrector combining candidates with language model context.
//!
//! Tokens are processed left to right. Known words are accepted as they are;
//! an unknown word is replaced by its best-scoring candidate, where the score
//! depends on how many accepted words precede it:
//!
//! | accepted context | score                                                  |
//! |------------------|--------------------------------------------------------|
//! | none             | `P(c)`                                                 |
//! | `w1`             | `0.80·P(w1 c) + 0.20·P(c)`                             |
//! | `w1 w2`          | `0.75·P(w1 w2 c) + 0.20·P(w2 c) + 0.05·P(c)`           |
//!
//! Equal scores are resolved in favour of the lexicographically smallest
//! candidate, so corrections are reproducible.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::SentenceNormalizer;
use crate::config::SpellerConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::language_model::{
    LanguageModel, NgramLanguageModel, bigram_interpolation, trigram_interpolation,
};
use crate::spelling::cache::CacheStats;
use crate::spelling::candidates::{CandidateConfig, CandidateGenerator, CandidateSet};
use crate::spelling::dictionary::WordFrequencyTable;
use crate::storage::snapshot::Snapshot;

/// Log target of the per-token candidate trace.
pub const TRACE_TARGET: &str = module_path!();

/// The accepted words preceding the token being corrected.
///
/// Holds at most the two most recent words; older words are dropped as new
/// ones are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorrectionContext {
    #[default]
    Empty,
    One(String),
    Two(String, String),
}

impl CorrectionContext {
    /// The context after accepting `word`.
    pub fn advance(self, word: &str) -> Self {
        match self {
            CorrectionContext::Empty => CorrectionContext::One(word.to_string()),
            CorrectionContext::One(prev) => CorrectionContext::Two(prev, word.to_string()),
            CorrectionContext::Two(_, prev) => CorrectionContext::Two(prev, word.to_string()),
        }
    }

    /// Score `candidate` in this context.
    pub fn score<M: LanguageModel + ?Sized>(&self, model: &M, candidate: &str) -> f64 {
        match self {
            CorrectionContext::Empty => model.unigram_prob(candidate),
            CorrectionContext::One(prev) => bigram_interpolation(model, prev, candidate),
            CorrectionContext::Two(prev2, prev1) => {
                trigram_interpolation(model, prev2, prev1, candidate)
            }
        }
    }
}

/// A replacement decision for one unknown token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCorrection {
    /// Index of the token in the normalized sentence.
    pub position: usize,
    /// The unknown token.
    pub original: String,
    /// The selected candidate (may equal `original`).
    pub corrected: String,
    /// Every candidate considered, in lexicographic order.
    pub candidates: Vec<String>,
    /// Score of the selected candidate.
    pub score: f64,
}

/// Result of correcting a sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Sentence as given.
    pub original: String,
    /// Normalized tokens before correction.
    pub tokens: Vec<String>,
    /// Space-joined accepted tokens.
    pub corrected: String,
    /// One entry per unknown token.
    pub corrections: Vec<TokenCorrection>,
}

impl CorrectionResult {
    /// Whether any token was replaced by a different word.
    pub fn has_changes(&self) -> bool {
        self.corrections.iter().any(|c| c.corrected != c.original)
    }
}

/// Pick the highest-scoring candidate, earliest in iteration order on ties.
fn select_best<'a, I, F>(candidates: I, mut score: F) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a String>,
    F: FnMut(&str) -> f64,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let value = score(candidate);
        match best {
            Some((_, best_value)) if value.total_cmp(&best_value) != Ordering::Greater => {}
            _ => best = Some((candidate.as_str(), value)),
        }
    }
    best
}

/// Corrects sentences against a word table and a language model.
#[derive(Debug)]
pub struct SentenceCorrector<M> {
    dictionary: Arc<WordFrequencyTable>,
    generator: CandidateGenerator,
    model: M,
    normalizer: SentenceNormalizer,
}

/// A corrector backed by the corpus-trained n-gram model.
pub type SpellCorrector = SentenceCorrector<NgramLanguageModel>;

impl<M: LanguageModel> SentenceCorrector<M> {
    /// Create a corrector over an already built table and model.
    pub fn new(dictionary: WordFrequencyTable, model: M, config: CandidateConfig) -> Result<Self> {
        let dictionary = Arc::new(dictionary);
        let generator = CandidateGenerator::new(Arc::clone(&dictionary), config)?;

        Ok(SentenceCorrector {
            dictionary,
            generator,
            model,
            normalizer: SentenceNormalizer::new(),
        })
    }

    /// Split a sentence into lowercase, punctuation-free tokens.
    pub fn normalize(&self, sentence: &str) -> Vec<String> {
        self.normalizer.normalize(sentence)
    }

    /// Whether `word` appears in the corpus.
    pub fn is_known(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    /// Candidate replacements for `word`; always contains `word`.
    pub fn candidates(&mut self, word: &str) -> Arc<CandidateSet> {
        self.generator.generate(word)
    }

    /// Most probable single-word correction by corpus frequency alone.
    pub fn correction(&mut self, word: &str) -> String {
        let candidates = self.generator.generate(word);
        let dictionary = &self.dictionary;
        select_best(candidates.iter(), |c| dictionary.probability(c))
            .map(|(best, _)| best.to_string())
            .unwrap_or_else(|| word.to_string())
    }

    /// Correct a sentence, reporting every decision made.
    pub fn correct(&mut self, sentence: &str) -> CorrectionResult {
        let tokens = self.normalize(sentence);
        let mut accepted: Vec<String> = Vec::with_capacity(tokens.len());
        let mut corrections = Vec::new();
        let mut context = CorrectionContext::Empty;

        for (position, token) in tokens.iter().enumerate() {
            let chosen = if self.dictionary.contains(token) {
                token.clone()
            } else {
                let candidates = self.generator.generate(token);
                let model = &self.model;
                let (best, score) = select_best(candidates.iter(), |c| context.score(model, c))
                    .map(|(best, score)| (best.to_string(), score))
                    .unwrap_or_else(|| (token.clone(), 0.0));

                corrections.push(TokenCorrection {
                    position,
                    original: token.clone(),
                    corrected: best.clone(),
                    candidates: candidates.iter().cloned().collect(),
                    score,
                });
                best
            };

            context = context.advance(&chosen);
            accepted.push(chosen);
        }

        CorrectionResult {
            original: sentence.to_string(),
            tokens,
            corrected: accepted.join(" "),
            corrections,
        }
    }

    /// Correct a sentence, logging each unknown token's candidates and the
    /// chosen replacement at info level under [`TRACE_TARGET`] when `debug`
    /// is set.
    pub fn correct_traced(&mut self, sentence: &str, debug: bool) -> CorrectionResult {
        let result = self.correct(sentence);
        if debug {
            for correction in &result.corrections {
                info!(
                    target: TRACE_TARGET,
                    "candidates for {}: {:?}, max prob word is {}",
                    correction.original, correction.candidates, correction.corrected
                );
            }
        }
        result
    }

    /// Correct a sentence and return the corrected text.
    ///
    /// `debug` only controls logging; the returned text is the same either
    /// way.
    pub fn validate(&mut self, sentence: &str, debug: bool) -> String {
        self.correct_traced(sentence, debug).corrected
    }

    /// The word frequency table.
    pub fn dictionary(&self) -> &WordFrequencyTable {
        &self.dictionary
    }

    /// The language model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The candidate generator configuration.
    pub fn candidate_config(&self) -> &CandidateConfig {
        self.generator.config()
    }

    /// Candidate cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.generator.cache_stats()
    }
}

impl SpellCorrector {
    /// Build the table and train the model from a corpus.
    pub fn from_corpus(corpus: &Corpus, config: &SpellerConfig) -> Result<Self> {
        let text = corpus.text();
        let dictionary = WordFrequencyTable::build(&text)?;
        info!(
            "built word table: {} distinct words, {} tokens",
            dictionary.word_count(),
            dictionary.total_frequency()
        );
        let model = NgramLanguageModel::from_corpus(&text, config.language_model.clone())?;
        Self::new(dictionary, model, config.candidates.clone())
    }

    /// Restore a corrector from a snapshot file.
    pub fn from_snapshot<P: AsRef<Path>>(path: P, config: &SpellerConfig) -> Result<Self> {
        let snapshot = Snapshot::load(path)?;
        Self::new(snapshot.dictionary, snapshot.model, config.candidates.clone())
    }

    /// Write the table and model to a snapshot file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = Snapshot::new(self.dictionary().clone(), self.model.clone());
        snapshot.save(path)
    }
}
