//! Language model interface used to score candidates in context.
//!
//! The corrector only needs two queries: the standalone probability of a
//! word and the joint probability of a short word sequence. Any model that
//! answers them can drive correction; [`NgramLanguageModel`] is the
//! corpus-trained implementation shipped with the crate.

pub mod interpolation;
pub mod ngram;

pub use interpolation::*;
pub use ngram::*;

/// Probability queries consumed by the sentence corrector.
///
/// Implementations must be pure: the same query always yields the same
/// value and has no side effects.
pub trait LanguageModel {
    /// Standalone probability of `word`.
    fn unigram_prob(&self, word: &str) -> f64;

    /// Joint probability of an ordered word sequence.
    fn sentence_prob(&self, words: &[&str]) -> f64;
}
