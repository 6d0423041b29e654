//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Environment variable naming the default snapshot file.
pub const SNAPSHOT_ENV: &str = "NGRAM_SPELLER_SNAPSHOT";

/// ngram-speller - corpus-trained sentence spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "ngram-speller")]
#[command(about = "Correct misspelled words using corpus frequencies and an n-gram model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    /// Whether candidate decisions should be logged.
    pub fn debug_corrections(&self) -> bool {
        matches!(&self.command, Command::Correct(correct) if correct.debug)
    }

    /// Log level for the whole crate, from verbosity alone.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Level for the candidate trace target, when `--debug` asks for it.
    pub fn trace_level(&self) -> Option<LevelFilter> {
        self.debug_corrections()
            .then(|| self.log_level().max(LevelFilter::Info))
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a snapshot from a corpus directory
    Build(BuildArgs),

    /// Correct a sentence
    Correct(CorrectArgs),

    /// Suggest the best correction for a single word
    Suggest(SuggestArgs),

    /// Show word table and language model statistics
    Stats(StatsArgs),
}

/// Where the word table and language model come from.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelSource {
    /// Snapshot file written by `build`
    #[arg(short, long, value_name = "SNAPSHOT", env = SNAPSHOT_ENV)]
    pub snapshot: Option<PathBuf>,

    /// Corpus directory to train from (takes precedence over --snapshot)
    #[arg(long, value_name = "CORPUS_DIR")]
    pub corpus: Option<PathBuf>,
}

/// Arguments for building a snapshot
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Corpus directory or file
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Snapshot file to write
    #[arg(short, long, value_name = "SNAPSHOT")]
    pub output: PathBuf,
}

/// Arguments for correcting a sentence
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Sentence to correct
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,

    /// Log the candidates considered for each unknown word
    #[arg(long)]
    pub debug: bool,

    #[command(flatten)]
    pub source: ModelSource,
}

/// Arguments for single-word suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Word to correct
    #[arg(value_name = "WORD")]
    pub word: String,

    #[command(flatten)]
    pub source: ModelSource,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Number of most frequent words to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub source: ModelSource,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
