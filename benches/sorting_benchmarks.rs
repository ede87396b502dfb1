//! Sorting animation benchmarks.
//!
//! Measures engine overhead per run with pacing disabled, so the numbers
//! reflect stepping and chart reconciliation rather than sleeping.
//!
//! Run with: cargo bench --bench sorting_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sortviz::config::{ChartConfig, DataSize, PacingConfig};
use sortviz::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime")
}

fn dataset(size: DataSize) -> Sequence {
    let mut rng = DataRng::new(42);
    Sequence::from_raw(&rng.dataset_for(size, 100))
}

/// Full run through `StepSequencer` into a `BarChart` for every algorithm.
fn bench_sequencer_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequencer_run");
    group.sample_size(30);

    let runtime = runtime();
    let registry = AlgorithmRegistry::builtin();
    let pacing = PacingConfig {
        delay_ms: 0,
        ..PacingConfig::default()
    };

    for size in [DataSize::Small, DataSize::Large] {
        for algorithm in registry.iter() {
            let id = format!("{}/{}", algorithm.id(), size.len());
            group.bench_with_input(BenchmarkId::from_parameter(id), &size, |b, &size| {
                b.iter(|| {
                    let (chart, shared) = share(BarChart::new(ChartConfig::default()));
                    let mut seq = dataset(size);
                    chart.borrow_mut().initial(seq.rendered());
                    let sequencer = StepSequencer::new(shared, pacing.clone());
                    let summary = runtime
                        .block_on(sequencer.run(&mut seq, algorithm))
                        .expect("run completes");
                    black_box(summary.steps)
                });
            });
        }
    }

    group.finish();
}

/// Chart reconciliation cost of a single frame.
fn bench_chart_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_update");

    for size in DataSize::ALL {
        let seq = dataset(size);
        let mut chart = BarChart::new(ChartConfig::default());
        chart.initial(seq.rendered());
        group.bench_with_input(BenchmarkId::from_parameter(size.len()), &seq, |b, seq| {
            b.iter(|| {
                chart.update(black_box(seq.rendered()), Highlight::pair(0, 1));
                black_box(chart.frames())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sequencer_runs, bench_chart_update);
criterion_main!(benches);
