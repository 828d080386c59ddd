use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use simlab::{
    compare_texts, embed, CandidateDocument, HeuristicReranker, NoJitter, RerankConfig,
};

fn sample_text(words: usize) -> String {
    const VOCAB: &[&str] = &[
        "machine", "learning", "weather", "rust", "memory", "safety", "neural", "network",
        "market", "forecast", "ownership", "borrow",
    ];
    (0..words)
        .map(|i| VOCAB[i % VOCAB.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_embed(c: &mut Criterion) {
    let mut group = c.benchmark_group("embed");
    for words in [8usize, 64, 512] {
        let text = sample_text(words);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            b.iter(|| embed(black_box(text)));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let a = sample_text(32);
    let b = sample_text(48);
    c.bench_function("compare_texts_32x48", |bench| {
        bench.iter(|| compare_texts(black_box(&a), black_box(&b)));
    });
}

fn bench_rerank(c: &mut Criterion) {
    let reranker = HeuristicReranker::with_jitter(RerankConfig::default(), NoJitter);
    let mut group = c.benchmark_group("rerank");
    for docs in [10usize, 100, 1_000] {
        let candidates: Vec<CandidateDocument> = (0..docs)
            .map(|i| CandidateDocument::new(i as i64, sample_text(20 + i % 7), "bench", 0.5))
            .collect();
        group.throughput(Throughput::Elements(docs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(docs), &candidates, |b, candidates| {
            b.iter(|| {
                reranker
                    .rerank(black_box("what is machine learning"), candidates, 10)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_embed, bench_compare, bench_rerank);
criterion_main!(benches);
