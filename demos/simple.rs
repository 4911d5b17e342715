use heading_fusion::{HeadingEstimator, SensorEvent, presentation::readout};

fn main() {
    env_logger::init();

    let mut estimator = HeadingEstimator::new();

    for _ in 0..100 {
        // this loop should run each time the host delivers a sensor sample
        let accelerometer = SensorEvent::accelerometer(0.0, 0.0, 9.8); // replace with actual accelerometer data in m/s²
        let magnetometer = SensorEvent::magnetometer(-30.0, 30.0, -35.0); // replace with actual magnetometer data in µT

        for event in [accelerometer, magnetometer] {
            if let Some(sample) = estimator.ingest(event) {
                println!(
                    "Heading: {} (pointer {:.2} -> {:.2})",
                    readout(sample.current),
                    sample.previous,
                    sample.current
                );
            }
        }
    }
}
