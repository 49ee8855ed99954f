//! Sequential vs parallel grid scoring on a synthetic grid

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use otu_scorer::{CellRecord, GridScorer, IndexWeights, MetricKey, RawMetrics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_cells(n: usize) -> Vec<CellRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let mut raw = RawMetrics::new()
                .with(MetricKey::Ndvi, rng.gen_range(-1.0..1.0))
                .with(MetricKey::Protodyakonov, rng.gen_range(0.3..20.0))
                .with(MetricKey::SlopeDeg, rng.gen_range(0.0..45.0))
                .with(MetricKey::WaterFraction, rng.gen_range(0.0..1.0));
            // ~10% of cells without soil survey coverage
            if rng.gen_bool(0.9) {
                raw.insert(MetricKey::Bonitet, rng.gen_range(0.0..100.0));
            }
            CellRecord {
                cell_id: format!("cell_{}", i),
                bounds: None,
                raw,
            }
        })
        .collect()
}

fn bench_grid_scoring(c: &mut Criterion) {
    let scorer = GridScorer::new(IndexWeights::default());
    let mut group = c.benchmark_group("grid_scoring");

    for &n in &[1_000usize, 100_000] {
        let cells = synthetic_cells(n);
        group.bench_with_input(BenchmarkId::new("sequential", n), &cells, |b, cells| {
            b.iter(|| scorer.score_cells(black_box(cells)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &cells, |b, cells| {
            b.iter(|| scorer.score_cells_parallel(black_box(cells)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_scoring);
criterion_main!(benches);
