//! Spelling correction for whole sentences.
//!
//! This module provides the corpus word table, candidate generation for
//! unknown words and the sentence corrector that ranks candidates with a
//! language model.

pub mod cache;
pub mod candidates;
pub mod corrector;
pub mod dictionary;

// Re-export commonly used types
pub use cache::*;
pub use candidates::*;
pub use corrector::*;
pub use dictionary::*;
