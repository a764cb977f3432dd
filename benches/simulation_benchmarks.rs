//! Simulation benchmarks.
//!
//! Run with: cargo bench
//!
//! Measures iteration throughput and the cost of the summary reductions
//! at the iteration counts the CLI typically runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sprintsim::prelude::*;
use sprintsim::stats::percentile;

fn config(iterations: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .seed(42)
        .iterations(iterations)
        .build()
}

/// Full run: sampling plus summary.
fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    group.sample_size(50);
    group.confidence_level(0.95);

    for n in [1_000usize, 5_000, 20_000] {
        let simulation = match Simulation::new(config(n)) {
            Ok(simulation) => simulation,
            Err(e) => panic!("invalid benchmark config: {e}"),
        };
        group.bench_with_input(BenchmarkId::new("iterations", n), &n, |b, _| {
            b.iter(|| black_box(simulation.run()));
        });
    }

    group.finish();
}

/// Sampling only, against an injected random source.
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    let Ok(simulation) = Simulation::new(config(5_000)) else {
        panic!("invalid benchmark config");
    };
    group.bench_function("run_with_5000", |b| {
        b.iter(|| {
            let mut rng = SimRng::new(black_box(7));
            black_box(simulation.run_with(&mut rng))
        });
    });

    group.finish();
}

/// Summary reductions over a fixed result set.
fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    let Ok(simulation) = Simulation::new(config(5_000)) else {
        panic!("invalid benchmark config");
    };
    let results = simulation.run().results;
    let tco: Vec<f64> = results.iter().map(|r| r.tco_total).collect();

    group.bench_function("percentile_p90", |b| {
        b.iter(|| black_box(percentile(black_box(&tco), 90.0)));
    });
    group.bench_function("summary_from_results", |b| {
        b.iter(|| black_box(SimulationSummary::from_results(black_box(&results))));
    });
    group.bench_function("cost_drivers", |b| {
        b.iter(|| black_box(cost_drivers(black_box(&results))));
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_sampling, bench_summary);
criterion_main!(benches);
