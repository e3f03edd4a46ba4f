//! Criterion benchmark for the control-chart engine's hot path.
//!
//! Benchmarks:
//! 1. Full `analyze` over a long synthetic series (all four rules)
//! 2. `scan_one` in isolation, per rule
//! 3. `resolve` in isolation, given a pre-scanned signal list

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sqc_core::{analyze, default_catalog, resolve, scan_one};

fn make_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (i as f64 * 0.37).sin() * 2.0 + (i as f64 * 0.01).cos())
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let catalog = default_catalog();
    let mut group = c.benchmark_group("analyze");
    for &n in &[100usize, 1_000, 10_000, 100_000] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, series| {
            b.iter(|| analyze(black_box(series), 0.0, 1.0, black_box(&catalog)).unwrap());
        });
    }
    group.finish();
}

fn bench_scan_one(c: &mut Criterion) {
    let catalog = default_catalog();
    let series = make_series(10_000);
    let mut group = c.benchmark_group("scan_one");
    for rule in &catalog {
        group.bench_with_input(BenchmarkId::from_parameter(rule.name), rule, |b, rule| {
            b.iter(|| scan_one(black_box(&series), black_box(rule), 0.0, 1.0));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let catalog = default_catalog();
    let series = make_series(10_000);
    let signals: Vec<_> = catalog
        .iter()
        .flat_map(|rule| scan_one(&series, rule, 0.0, 1.0))
        .collect();

    c.bench_function("resolve_10000", |b| {
        b.iter(|| resolve(black_box(signals.clone()), black_box(&catalog), series.len()).unwrap());
    });
}

criterion_group!(benches, bench_analyze, bench_scan_one, bench_resolve);
criterion_main!(benches);
