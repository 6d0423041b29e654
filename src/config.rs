//! Configuration for building and running a corrector.
//!
//! A configuration file is JSON; every section and field is optional and
//! falls back to its default.
//!
//! ```json
//! {
//!   "corpus": { "encoding": "latin1", "skip_files": ["cmds"] },
//!   "candidates": { "max_edits": 3, "alphabet": "aiueon", "cache_capacity": 10000 },
//!   "language_model": { "smoothing": 1.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusConfig;
use crate::error::Result;
use crate::language_model::LanguageModelConfig;
use crate::spelling::candidates::CandidateConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellerConfig {
    /// How the corpus directory is read.
    pub corpus: CorpusConfig,
    /// Candidate generation and caching.
    pub candidates: CandidateConfig,
    /// Language model training.
    pub language_model: LanguageModelConfig,
}

impl SpellerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SpellerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.candidates.validate()?;
        self.language_model.validate()?;
        Ok(())
    }
}
