//! Benchmarks for k-medoids fitting.
//!
//! Measures the bandit engine against the exhaustive baseline and how fit
//! cost scales with dataset size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmedo::{Algorithm, KMedoids, KMedoidsConfig};
use rand::prelude::*;

fn blobs(n: usize, clusters: usize, dim: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let c = (i % clusters) as f64 * 25.0;
            (0..dim).map(|_| c + rng.random_range(-1.0..1.0)).collect()
        })
        .collect()
}

fn fit(rows: &[Vec<f64>], k: usize, algorithm: Algorithm) -> Vec<usize> {
    let mut engine = KMedoids::new(KMedoidsConfig {
        n_medoids: k,
        algorithm,
        use_fixed_perm: true,
        ..KMedoidsConfig::default()
    });
    engine.fit(rows, "L2").unwrap();
    engine.final_medoids().to_vec()
}

fn bench_bandit_vs_naive(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_k5");
    group.sample_size(10);

    let rows = blobs(400, 5, 8);
    group.bench_function("bandit", |b| {
        b.iter(|| fit(black_box(&rows), 5, Algorithm::BanditPam));
    });
    group.bench_function("naive", |b| {
        b.iter(|| fit(black_box(&rows), 5, Algorithm::Naive));
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("bandit_scaling");
    group.sample_size(10);

    for n in [200, 400, 800, 1600].iter() {
        group.throughput(Throughput::Elements(*n as u64));
        let rows = blobs(*n, 5, 8);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| fit(black_box(&rows), 5, Algorithm::BanditPam));
        });
    }

    group.finish();
}

fn bench_cache_effect(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_effect");
    group.sample_size(10);

    let rows = blobs(400, 5, 8);
    for cache in [true, false] {
        let label = if cache { "cached" } else { "uncached" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut engine = KMedoids::new(KMedoidsConfig {
                    n_medoids: 5,
                    cache,
                    use_fixed_perm: true,
                    ..KMedoidsConfig::default()
                });
                engine.fit(black_box(&rows), "L2").unwrap();
                engine.final_medoids().to_vec()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bandit_vs_naive, bench_scaling, bench_cache_effect);
criterion_main!(benches);
