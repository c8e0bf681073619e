//! Criterion benchmarks for portsim_core projection
//!
//! Run with: cargo bench -p portsim_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use portsim_core::{ReturnPool, SimulationConfig, project, project_with_rng, summarize};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Five years of synthetic monthly returns for four assets
fn create_pool() -> ReturnPool {
    let rows = (0..60)
        .map(|month| {
            (0..4)
                .map(|asset| {
                    let phase = f64::from(month * (asset + 3)) * 0.37;
                    0.008 + 0.05 * phase.sin() / f64::from(asset + 1)
                })
                .collect()
        })
        .collect();
    ReturnPool::new(
        vec![
            "PETR4".to_string(),
            "WEGE3".to_string(),
            "LEVE3".to_string(),
            "BBDC4".to_string(),
        ],
        rows,
    )
    .expect("synthetic pool is valid")
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let pool = create_pool();

    for paths in [1_000, 10_000, 50_000].iter() {
        let config = SimulationConfig::from_years(1_000.0, *paths, 10).unwrap();
        group.bench_with_input(BenchmarkId::new("paths", paths), paths, |b, _| {
            b.iter(|| project(black_box(&pool), black_box(&config), Some(42)))
        });
    }

    group.finish();
}

fn bench_sequential_vs_batched(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_comparison");
    let pool = create_pool();
    let config = SimulationConfig::from_years(1_000.0, 10_000, 10).unwrap();

    group.bench_function("batched", |b| {
        b.iter(|| project(black_box(&pool), black_box(&config), Some(42)))
    });

    group.bench_function("single_rng", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            project_with_rng(black_box(&pool), black_box(&config), &mut rng)
        })
    });

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let pool = create_pool();
    let config = SimulationConfig::from_years(1_000.0, 10_000, 10).unwrap();
    let terminal = project(&pool, &config, Some(42)).unwrap().terminal();

    c.bench_function("summarize_10k", |b| b.iter(|| summarize(black_box(&terminal))));
}

criterion_group!(
    benches,
    bench_projection,
    bench_sequential_vs_batched,
    bench_summarize,
);
criterion_main!(benches);
