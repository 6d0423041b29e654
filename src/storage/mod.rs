//! Persistence of built correctors.
//!
//! Building a corrector means reading the whole corpus and training the
//! language model. A snapshot stores the result so later runs can restore
//! it instead of rebuilding.

pub mod snapshot;

// Re-export commonly used types
pub use snapshot::*;
