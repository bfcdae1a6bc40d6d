//! Benchmarks for the similarity ranker
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic catalog so the benchmark has no data-file dependency.

use catalog::Course;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use models::{SparseVector, TfidfVectorizer, Vectorize};
use pipeline::SimilarityRanker;
use std::collections::HashMap;
use std::sync::Arc;

const VOCAB: &[&str] = &[
    "biology", "cells", "organisms", "math", "calculus", "algebra", "history", "ancient",
    "modern", "art", "painting", "sculpture", "music", "theory", "composition", "physics",
];

fn vectorizer() -> Arc<TfidfVectorizer> {
    let vocabulary: HashMap<String, usize> = VOCAB
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.to_string(), idx))
        .collect();
    Arc::new(TfidfVectorizer::new(vocabulary, vec![1.0; VOCAB.len()]).unwrap())
}

fn synthetic_subset(count: usize) -> Vec<Course> {
    (0..count)
        .map(|i| {
            // Deterministic pseudo-description cycling through the vocabulary.
            let a = VOCAB[i % VOCAB.len()];
            let b = VOCAB[(i * 7 + 3) % VOCAB.len()];
            let c = VOCAB[(i * 13 + 5) % VOCAB.len()];
            Course {
                key: format!("C{i:04}"),
                title: format!("Course {i}"),
                description: format!("{a} {b} {c} {a}"),
                minimum_credits: Some(3.0),
                cluster: 0,
            }
        })
        .collect()
}

fn user_vector(vectorizer: &TfidfVectorizer) -> SparseVector {
    vectorizer.vectorize("biology cells organisms")
}

fn bench_rank_small_cluster(c: &mut Criterion) {
    let vectorizer = vectorizer();
    let ranker = SimilarityRanker::new(vectorizer.clone());
    let subset = synthetic_subset(50);
    let user = user_vector(&vectorizer);

    c.bench_function("rank_50_courses_top_25", |b| {
        b.iter(|| {
            let ranked = ranker.rank(black_box(&user), black_box(&subset), black_box(25));
            black_box(ranked)
        })
    });
}

fn bench_rank_large_cluster(c: &mut Criterion) {
    let vectorizer = vectorizer();
    let ranker = SimilarityRanker::new(vectorizer.clone());
    let subset = synthetic_subset(2000);
    let user = user_vector(&vectorizer);

    c.bench_function("rank_2000_courses_top_25", |b| {
        b.iter(|| {
            let ranked = ranker.rank(black_box(&user), black_box(&subset), black_box(25));
            black_box(ranked)
        })
    });
}

fn bench_vectorize_description(c: &mut Criterion) {
    let vectorizer = vectorizer();
    let text = "biology cells organisms math history painting theory physics";

    c.bench_function("vectorize_description", |b| {
        b.iter(|| black_box(vectorizer.vectorize(black_box(text))))
    });
}

criterion_group!(
    benches,
    bench_rank_small_cluster,
    bench_rank_large_cluster,
    bench_vectorize_description
);
criterion_main!(benches);
