use ngram_speller::config::SpellerConfig;
use ngram_speller::corpus::CorpusReader;
use ngram_speller::error::SpellerError;
use ngram_speller::spelling::SpellCorrector;
use ngram_speller::storage::{SNAPSHOT_MAGIC, Snapshot};

use std::fs;
use tempfile::tempdir;

#[test]
fn test_snapshot_restores_identical_corrector() {
    let dir = tempdir().unwrap();
    let corpus_dir = dir.path().join("corpus");
    fs::create_dir_all(&corpus_dir).unwrap();
    fs::write(
        corpus_dir.join("a.txt"),
        "the cat sat on the mat.\nthe dog ran in the sun.",
    )
    .unwrap();

    let config = SpellerConfig::default();
    let corpus = CorpusReader::new(config.corpus.clone())
        .read(&corpus_dir)
        .unwrap();
    let mut built = SpellCorrector::from_corpus(&corpus, &config).unwrap();

    let snapshot_path = dir.path().join("speller.snap");
    built.save_snapshot(&snapshot_path).unwrap();

    let bytes = fs::read(&snapshot_path).unwrap();
    assert_eq!(&bytes[..4], &SNAPSHOT_MAGIC);

    let mut restored = SpellCorrector::from_snapshot(&snapshot_path, &config).unwrap();
    assert_eq!(restored.dictionary(), built.dictionary());
    assert_eq!(restored.model(), built.model());

    for sentence in ["th ct st", "th dg rn n th sn", "xyz"] {
        assert_eq!(
            restored.validate(sentence, false),
            built.validate(sentence, false)
        );
    }
}

#[test]
fn test_corrupted_snapshot_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speller.snap");

    let config = SpellerConfig::default();
    let corrector = SpellCorrector::from_corpus(
        &ngram_speller::corpus::Corpus::from_documents(vec![
            ngram_speller::corpus::CorpusDocument {
                path: "inline".into(),
                text: "one two three".to_string(),
            },
        ]),
        &config,
    )
    .unwrap();
    corrector.save_snapshot(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2 + 10;
    bytes[middle] ^= 0x5A;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        SpellCorrector::from_snapshot(&path, &config),
        Err(SpellerError::Snapshot(_))
    ));
    assert!(Snapshot::load(&path).is_err());
}

#[test]
fn test_empty_corpus_cannot_be_built() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blank.txt"), " ... !!! ").unwrap();

    let config = SpellerConfig::default();
    let corpus = CorpusReader::new(config.corpus.clone())
        .read(dir.path())
        .unwrap();
    assert!(matches!(
        SpellCorrector::from_corpus(&corpus, &config),
        Err(SpellerError::EmptyCorpus(_))
    ));
}
