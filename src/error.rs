//! Error types for the ngram-speller library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpellerError`] enum.
//!
//! # Examples
//!
//! ```
//! use ngram_speller::error::{Result, SpellerError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellerError::invalid_config("max_edits must be at most 4"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ngram-speller operations.
#[derive(Error, Debug)]
pub enum SpellerError {
    /// I/O errors (corpus files, snapshot files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus produced no tokens, so no probability is defined.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Corpus traversal or decoding errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Snapshot format errors (bad magic, version, checksum)
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Tokenizer or normalizer errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpellerError.
pub type Result<T> = std::result::Result<T, SpellerError>;

impl SpellerError {
    /// Create a new empty corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        SpellerError::EmptyCorpus(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SpellerError::Corpus(msg.into())
    }

    /// Create a new snapshot error.
    pub fn snapshot<S: Into<String>>(msg: S) -> Self {
        SpellerError::Snapshot(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpellerError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellerError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SpellerError::empty_corpus("no tokens in corpus/");
        assert_eq!(error.to_string(), "Empty corpus: no tokens in corpus/");

        let error = SpellerError::snapshot("bad magic");
        assert_eq!(error.to_string(), "Snapshot error: bad magic");

        let error = SpellerError::invalid_config("alphabet is empty");
        assert_eq!(error.to_string(), "Invalid configuration: alphabet is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let speller_error = SpellerError::from(io_error);

        match speller_error {
            SpellerError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
