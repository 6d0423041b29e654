//! # ngram-speller
//!
//! Sentence spelling correction driven by a text corpus.
//!
//! ## Features
//!
//! - Word frequency table built from corpus text
//! - Candidate generation by bounded character edits, with an LRU cache
//! - Unigram, bigram and trigram language model with add-k smoothing
//! - Context-aware sentence correction with deterministic tie-breaking
//! - Versioned, checksummed snapshots of built models
//!
//! ```no_run
//! use ngram_speller::config::SpellerConfig;
//! use ngram_speller::corpus::CorpusReader;
//! use ngram_speller::spelling::SpellCorrector;
//!
//! # fn main() -> ngram_speller::error::Result<()> {
//! let config = SpellerConfig::default();
//! let corpus = CorpusReader::new(config.corpus.clone()).read("corpus")?;
//! let mut corrector = SpellCorrector::from_corpus(&corpus, &config)?;
//! println!("{}", corrector.validate("th ct st", false));
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod language_model;
pub mod spelling;
pub mod storage;
