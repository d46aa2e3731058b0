//! Lexer and pattern registry benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use evoname::{Lexer, PatternRegistry, RegistryConfig};

mod common;
use common::{bundled_patterns, generate_names};

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for locale in ["de", "en"] {
        let patterns = bundled_patterns(locale).expect("bundled definitions compile");
        let lexer = Lexer::new(&patterns);

        group.bench_with_input(
            BenchmarkId::new("single", locale),
            &"Herr Prof. Dr. Klaus-Peter von Weber",
            |b, raw| b.iter(|| black_box(lexer.tokenize(black_box(raw)))),
        );
    }

    group.finish();
}

fn bench_tokenize_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_throughput");
    let patterns = bundled_patterns("de").expect("bundled definitions compile");
    let lexer = Lexer::new(&patterns);

    for count in [100, 1000, 10000] {
        let names = generate_names(count);
        let bytes: usize = names.iter().map(String::len).sum();
        group.throughput(Throughput::Bytes(bytes as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| {
                let total: usize = names.iter().map(|raw| lexer.tokenize(raw).len()).sum();
                black_box(total)
            })
        });
    }

    group.finish();
}

fn bench_registry_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    let config = RegistryConfig {
        fallback_to_bundled: true,
        ..Default::default()
    };

    group.bench_function("cold_compile", |b| {
        b.iter(|| {
            let registry =
                PatternRegistry::with_config(config.clone(), "/nonexistent/regex_definitions.json");
            black_box(registry.resolve("de", None))
        })
    });

    let warm = PatternRegistry::with_config(config.clone(), "/nonexistent/regex_definitions.json");
    warm.resolve("de", None).expect("bundled definitions compile");
    group.bench_function("cached_lookup", |b| {
        b.iter(|| black_box(warm.resolve(black_box("de"), None)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_tokenize_throughput,
    bench_registry_resolve
);
criterion_main!(benches);
