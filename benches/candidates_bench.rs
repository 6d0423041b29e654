use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use ngram_speller::language_model::{LanguageModelConfig, NgramLanguageModel};
use ngram_speller::spelling::{
    CandidateConfig, CandidateGenerator, EditOperations, SentenceCorrector, WordFrequencyTable,
};

fn generate_corpus(sentences: usize) -> String {
    const WORDS: &[&str] = &[
        "the", "cat", "sat", "on", "mat", "dog", "ran", "in", "sun", "old", "man", "and",
        "station", "nation", "question", "answer", "people", "window", "garden", "evening",
    ];
    let mut text = String::new();
    for i in 0..sentences {
        for j in 0..8 {
            text.push_str(WORDS[(i * 7 + j * 3) % WORDS.len()]);
            text.push(' ');
        }
        text.push_str(".\n");
    }
    text
}

fn bench_candidates(c: &mut Criterion) {
    let corpus = generate_corpus(2_000);
    let table = Arc::new(WordFrequencyTable::build(&corpus).unwrap());
    let words = ["th", "ct", "sttn", "qstn", "wndw", "grdn", "vnng", "xyz"];

    let mut group = c.benchmark_group("candidates");

    let uncached = CandidateConfig {
        cache_capacity: 0,
        ..Default::default()
    };
    let mut generator = CandidateGenerator::new(Arc::clone(&table), uncached).unwrap();
    group.bench_function("insertion_only", |b| {
        b.iter(|| {
            for word in words {
                black_box(generator.generate(black_box(word)));
            }
        })
    });

    let mut cached = CandidateGenerator::new(Arc::clone(&table), CandidateConfig::default()).unwrap();
    group.bench_function("insertion_only_cached", |b| {
        b.iter(|| {
            for word in words {
                black_box(cached.generate(black_box(word)));
            }
        })
    });

    let full = CandidateConfig {
        max_edits: 2,
        alphabet: "abcdefghijklmnopqrstuvwxyz".to_string(),
        operations: EditOperations::full(),
        cache_capacity: 0,
    };
    let mut full_generator = CandidateGenerator::new(Arc::clone(&table), full).unwrap();
    group.bench_function("full_edits", |b| {
        b.iter(|| {
            for word in ["teh", "sta", "mna"] {
                black_box(full_generator.generate(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_sentence(c: &mut Criterion) {
    let corpus = generate_corpus(2_000);
    let table = WordFrequencyTable::build(&corpus).unwrap();
    let model = NgramLanguageModel::from_corpus(&corpus, LanguageModelConfig::default()).unwrap();
    let mut corrector = SentenceCorrector::new(table, model, CandidateConfig::default()).unwrap();

    c.bench_function("correct_sentence", |b| {
        b.iter(|| black_box(corrector.validate(black_box("th ld mn sttn n th vnng"), false)))
    });
}

criterion_group!(benches, bench_candidates, bench_sentence);
criterion_main!(benches);
