//! Fixed-weight n-gram interpolation.
//!
//! The weights are constants, not estimated from data.

use super::LanguageModel;

/// Weights for `[bigram, unigram]`.
pub const BIGRAM_WEIGHTS: [f64; 2] = [0.80, 0.20];

/// Weights for `[trigram, bigram, unigram]`.
pub const TRIGRAM_WEIGHTS: [f64; 3] = [0.75, 0.20, 0.05];

/// Score `word` following `prev`.
pub fn bigram_interpolation<M: LanguageModel + ?Sized>(model: &M, prev: &str, word: &str) -> f64 {
    let [l_bigram, l_unigram] = BIGRAM_WEIGHTS;
    l_bigram * model.sentence_prob(&[prev, word]) + l_unigram * model.unigram_prob(word)
}

/// Score `word` following `prev2 prev1`.
pub fn trigram_interpolation<M: LanguageModel + ?Sized>(
    model: &M,
    prev2: &str,
    prev1: &str,
    word: &str,
) -> f64 {
    let [l_trigram, l_bigram, l_unigram] = TRIGRAM_WEIGHTS;
    l_trigram * model.sentence_prob(&[prev2, prev1, word])
        + l_bigram * model.sentence_prob(&[prev1, word])
        + l_unigram * model.unigram_prob(word)
}
