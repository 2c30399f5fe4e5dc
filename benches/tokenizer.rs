//! Tokenizer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vargs::message::{MessageTemplate, OscSink};
use vargs::tokenizer::{SeparatorSet, Tokenizer};
use vargs::Config;

fn bench_tokenize_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    // Typical file list
    let lines = "src/tokenizer/scanner.rs\n".repeat(2000);
    group.throughput(Throughput::Bytes(lines.len() as u64));

    group.bench_function("lines", |b| {
        b.iter(|| {
            let tokenizer = Tokenizer::new(black_box(lines.as_bytes()), SeparatorSet::default());
            black_box(tokenizer.count())
        })
    });

    group.finish();
}

fn bench_tokenize_utf8_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    // Multi-byte words split on every whitespace class
    let words = "Hello 世界\t😀 café\r\n".repeat(1000);
    group.throughput(Throughput::Bytes(words.len() as u64));

    group.bench_function("utf8_words", |b| {
        let separators = SeparatorSet::parse("space,tab,newline").unwrap();
        b.iter(|| {
            let tokenizer = Tokenizer::new(black_box(words.as_bytes()), separators.clone());
            black_box(tokenizer.count())
        })
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let items = "item\0".repeat(2000);
    group.throughput(Throughput::Bytes(items.len() as u64));

    group.bench_function("substitute", |b| {
        let config = Config::new(
            SeparatorSet::nul(),
            MessageTemplate::new(vec!["edit".into(), "{}".into()], Some("{}".into())),
        );
        b.iter(|| {
            let report = vargs::run(&config, black_box(items.as_bytes()), OscSink::new(Vec::new()));
            black_box(report.written)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize_lines,
    bench_tokenize_utf8_words,
    bench_pipeline
);

criterion_main!(benches);
