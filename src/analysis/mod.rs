//! Text analysis for the speller.
//!
//! Corpus text and user sentences are turned into lowercase word sequences
//! here. The corpus side extracts runs of word characters; the sentence side
//! strips punctuation and splits on whitespace.

pub mod normalizer;
pub mod tokenizer;

// Re-export commonly used types
pub use normalizer::*;
pub use tokenizer::*;
