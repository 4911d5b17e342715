use criterion::{Criterion, black_box, criterion_group, criterion_main};
use heading_fusion::{
    EstimatorSettings, HeadingEstimator, Orientation, SensorEvent, SharedEstimator,
    normalize_degree, rotation_matrix,
};
use nalgebra::Vector3;
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;

// Pre-generated sensor data to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    events: Vec<SensorEvent>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut events = Vec::with_capacity(count * 2);

        for i in 0..count {
            let time = i as f32 * 0.02; // 50Hz per sensor
            let turn_phase = time * 0.2 * 2.0 * PI;

            // Handset held roughly level, slowly turning, with hand tremor
            events.push(SensorEvent::accelerometer(
                0.3 * turn_phase.sin() + rng.random_range(-0.05..0.05),
                0.2 * turn_phase.cos() + rng.random_range(-0.05..0.05),
                9.8 + rng.random_range(-0.05..0.05),
            ));
            events.push(SensorEvent::magnetometer(
                -40.0 * turn_phase.sin() + rng.random_range(-1.0..1.0),
                40.0 * turn_phase.cos() + rng.random_range(-1.0..1.0),
                -30.0 + rng.random_range(-1.0..1.0),
            ));
        }

        Self { events, index: 0 }
    }

    fn next(&mut self) -> SensorEvent {
        let event = self.events[self.index];
        self.index = (self.index + 1) % self.events.len();
        event
    }
}

/// Realistic settled readings (m/s² and µT)
fn settled_pair() -> (Vector3<f32>, Vector3<f32>) {
    (Vector3::new(0.1, -0.2, 9.8), Vector3::new(22.0, 5.0, -38.0))
}

/// Benchmark one ingest + compute cycle
fn bench_ingest(c: &mut Criterion) {
    let mut estimator = HeadingEstimator::new();
    let mut data = PreGeneratedData::new(1000, 42);

    c.bench_function("estimator_ingest", |b| {
        b.iter(|| black_box(estimator.ingest(black_box(data.next()))))
    });
}

/// Benchmark smoothing alone
fn bench_smoothing(c: &mut Criterion) {
    let mut estimator = HeadingEstimator::new();
    let (gravity, _) = settled_pair();

    c.bench_function("estimator_smoothing", |b| {
        b.iter(|| estimator.ingest_accelerometer(black_box(gravity)))
    });
}

/// Benchmark rotation matrix construction
fn bench_rotation_matrix(c: &mut Criterion) {
    let settings = EstimatorSettings::default();
    let (gravity, field) = settled_pair();

    c.bench_function("rotation_matrix", |b| {
        b.iter(|| black_box(rotation_matrix(&settings, black_box(gravity), black_box(field))))
    });
}

/// Benchmark orientation extraction
fn bench_orientation(c: &mut Criterion) {
    let (gravity, field) = settled_pair();
    let matrix = rotation_matrix(&EstimatorSettings::default(), gravity, field).unwrap();

    c.bench_function("orientation_from_matrix", |b| {
        b.iter(|| black_box(Orientation::from_rotation_matrix(black_box(&matrix))))
    });
}

/// Benchmark bearing normalization
fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_degree", |b| {
        b.iter(|| black_box(normalize_degree(black_box(-123.4))))
    });
}

/// Benchmark the locked cycle including the hand-off post
fn bench_shared_ingest(c: &mut Criterion) {
    let (shared, queue) = SharedEstimator::new(HeadingEstimator::new());
    shared.start_consuming();
    let mut data = PreGeneratedData::new(1000, 7);

    c.bench_function("shared_estimator_ingest", |b| {
        b.iter(|| {
            black_box(shared.on_sensor_event(black_box(data.next())));
            // Keep the channel from growing across iterations
            while queue.try_next().is_some() {}
        })
    });
}

/// Benchmark batch processing of sensor events
fn bench_batch_ingest(c: &mut Criterion) {
    let mut estimator = HeadingEstimator::new();
    let mut data = PreGeneratedData::new(1000, 3);

    c.bench_function("estimator_batch_100_events", |b| {
        b.iter(|| {
            for _ in 0..100 {
                black_box(estimator.ingest(data.next()));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_ingest,
    bench_smoothing,
    bench_rotation_matrix,
    bench_orientation,
    bench_normalize,
    bench_shared_ingest,
    bench_batch_ingest
);

criterion_main!(benches);
