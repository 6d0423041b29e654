//! Command implementations for the ngram-speller CLI.

use std::fs;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SpellerConfig;
use crate::corpus::CorpusReader;
use crate::error::{Result, SpellerError};
use crate::spelling::corrector::SpellCorrector;

/// Execute a CLI command.
pub fn execute_command(args: SpellerArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Build(build_args) => build_snapshot(build_args, &config, &args),
        Command::Correct(correct_args) => correct_sentence(correct_args, &config, &args),
        Command::Suggest(suggest_args) => suggest_word(suggest_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
    }
}

/// Read the configuration file, or fall back to defaults.
fn load_config(args: &SpellerArgs) -> Result<SpellerConfig> {
    match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            SpellerConfig::load(path)
        }
        None => Ok(SpellerConfig::default()),
    }
}

/// Build a corrector from whichever source was given.
pub fn open_corrector(source: &ModelSource, config: &SpellerConfig) -> Result<SpellCorrector> {
    if let Some(corpus_path) = &source.corpus {
        let corpus = CorpusReader::new(config.corpus.clone()).read(corpus_path)?;
        return SpellCorrector::from_corpus(&corpus, config);
    }
    if let Some(snapshot_path) = &source.snapshot {
        return SpellCorrector::from_snapshot(snapshot_path, config);
    }
    Err(SpellerError::invalid_config(format!(
        "no model source: pass --snapshot, --corpus or set {SNAPSHOT_ENV}"
    )))
}

/// Read a corpus and write a snapshot.
fn build_snapshot(args: &BuildArgs, config: &SpellerConfig, cli_args: &SpellerArgs) -> Result<()> {
    let start_time = Instant::now();

    let corpus = CorpusReader::new(config.corpus.clone()).read(&args.corpus)?;
    let corrector = SpellCorrector::from_corpus(&corpus, config)?;
    corrector.save_snapshot(&args.output)?;

    let size_bytes = fs::metadata(&args.output)?.len();
    let duration = start_time.elapsed();
    info!("build finished in {duration:?}");

    let result = BuildResult {
        snapshot: args.output.to_string_lossy().to_string(),
        documents: corpus.len(),
        distinct_words: corrector.dictionary().word_count(),
        total_words: corrector.dictionary().total_frequency(),
        bigrams: corrector.model().bigram_count(),
        trigrams: corrector.model().trigram_count(),
        size_bytes,
        duration_ms: duration.as_millis() as u64,
    };

    output_result(
        &format!(
            "Snapshot written to {} ({})",
            result.snapshot,
            format_bytes(size_bytes)
        ),
        &result,
        1,
        cli_args,
    )
}

/// Correct one sentence.
fn correct_sentence(
    args: &CorrectArgs,
    config: &SpellerConfig,
    cli_args: &SpellerArgs,
) -> Result<()> {
    let mut corrector = open_corrector(&args.source, config)?;

    let result = corrector.correct_traced(&args.sentence, args.debug);
    debug!("candidate cache: {:?}", corrector.cache_stats());

    output_result(&result.corrected, &result, 2, cli_args)
}

/// Suggest the best replacement for one word.
fn suggest_word(args: &SuggestArgs, config: &SpellerConfig, cli_args: &SpellerArgs) -> Result<()> {
    let mut corrector = open_corrector(&args.source, config)?;

    let word = args.word.to_lowercase();
    let candidates = corrector.candidates(&word);
    let result = SuggestionResult {
        known: corrector.is_known(&word),
        correction: corrector.correction(&word),
        candidates: candidates.iter().cloned().collect(),
        word,
    };

    output_result(&result.correction, &result, 2, cli_args)
}

/// Print statistics for the selected model.
fn show_stats(args: &StatsArgs, config: &SpellerConfig, cli_args: &SpellerArgs) -> Result<()> {
    let corrector = open_corrector(&args.source, config)?;
    let dictionary = corrector.dictionary();
    let model = corrector.model();
    let candidates = corrector.candidate_config();

    let result = ModelStats {
        distinct_words: dictionary.word_count(),
        total_words: dictionary.total_frequency(),
        max_word_len: dictionary.max_word_len(),
        bigrams: model.bigram_count(),
        trigrams: model.trigram_count(),
        smoothing: model.smoothing(),
        max_edits: candidates.max_edits,
        alphabet: candidates.alphabet.clone(),
        most_frequent: dictionary.most_frequent_words(args.top),
    };

    output_result(
        &format!(
            "{} distinct words, {} tokens",
            result.distinct_words, result.total_words
        ),
        &result,
        1,
        cli_args,
    )
}
