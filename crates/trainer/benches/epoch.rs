//! Benchmarks for a single gradient descent epoch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data_validator::TimeOfWeek;
use feature_engine::{FeatureExtractor, FeatureMatrix, Scaler};
use ndarray::Array1;
use trainer::{TrainerConfig, TrainingState};

/// One week of quarter-hour slots between `open` and `close`.
fn week(open: i64, close: i64) -> (FeatureMatrix, Array1<f64>) {
    let mut times = Vec::new();
    for dow in 1..=7 {
        for hour in open..close {
            for minute in [0, 15, 30, 45] {
                times.push(TimeOfWeek::new(dow, hour, minute).unwrap());
            }
        }
    }
    let y = times
        .iter()
        .map(|t| (t.hour() as f64) * 4.0 + t.dow() as f64)
        .collect();
    let raw = FeatureExtractor::new().extract_matrix(&times);
    let stats = Scaler::default().fit(&raw).unwrap();
    (stats.transform(&raw), y)
}

fn bench_epoch_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("trainer_epoch_step");
    let config = TrainerConfig::default();

    for &(open, close) in &[(8, 20), (6, 23), (0, 24)] {
        let (x, y) = week(open, close);
        let state = TrainingState::initial(&config);
        group.throughput(Throughput::Elements(x.nrows() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(x.nrows()), &x.nrows(), |b, _| {
            b.iter(|| state.step(black_box(&x), black_box(&y), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_epoch_step);
criterion_main!(benches);
