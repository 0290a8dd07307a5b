//! Benchmarks for parameter selection and curation on synthetic hotspots.
//!
//! Run with: `cargo bench --bench curation --features synthetic`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use photospots::synthetic::SyntheticScenario;
use photospots::{BackendKind, CurationConfig, ReferenceLocation, curate_and_rank, project, select};
use std::hint::black_box;

fn bench_parameter_selection(c: &mut Criterion) {
    let config = CurationConfig::default();
    let mut group = c.benchmark_group("parameter_selection");

    for &background in &[200usize, 1000, 5000] {
        let dataset = SyntheticScenario::with_hotspots(8, 50, background).generate();
        let projected = project(&dataset.points, ReferenceLocation::TORONTO.latitude);

        group.bench_with_input(
            BenchmarkId::new("radius", dataset.points.len()),
            &projected,
            |b, pts| {
                b.iter(|| select(black_box(pts), BackendKind::Radius, &config));
            },
        );
    }

    group.finish();
}

fn bench_curate_and_rank(c: &mut Criterion) {
    let config = CurationConfig {
        critical_char_dist: Some(0.05),
        ..CurationConfig::default()
    };
    let mut group = c.benchmark_group("curate_and_rank");

    for &hotspots in &[4usize, 16, 64] {
        let dataset = SyntheticScenario::with_hotspots(hotspots, 40, 500).generate();
        let backend = dataset.ground_truth_backend(BackendKind::Reachability);

        group.bench_with_input(
            BenchmarkId::new("hotspots", hotspots),
            &dataset.points,
            |b, pts| {
                b.iter(|| {
                    curate_and_rank(black_box(pts), ReferenceLocation::TORONTO, &backend, &config)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parameter_selection, bench_curate_and_rank);
criterion_main!(benches);
