//! Recorded sensor replay
//!
//! Plays a CSV recording of a handset turned through a full circle. A sensor
//! thread feeds the shared estimator at the recorded pace while the main
//! thread acts as the UI and presents every posted heading.
//!
//! Run with: `RUST_LOG=debug cargo run --example replay`

use std::error::Error;
use std::thread;
use std::time::Duration;

use heading_fusion::{
    HeadingEstimator, HeadingPresenter, PresentationUpdate, SensorEvent, SensorKind,
    SharedEstimator,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Sensor")]
    sensor: String,
    #[serde(rename = "X")]
    x: f32,
    #[serde(rename = "Y")]
    y: f32,
    #[serde(rename = "Z")]
    z: f32,
}

/// Console stand-in for a compass widget
#[derive(Default)]
struct ConsoleCompass {
    updates: usize,
}

impl HeadingPresenter for ConsoleCompass {
    fn present(&mut self, update: PresentationUpdate) {
        self.updates += 1;
        if self.updates % 50 == 0 {
            println!(
                "{:>5}  rotate {:7.2}° -> {:7.2}° over {:?}",
                update.readout,
                update.animation.from,
                update.animation.to,
                update.animation.duration
            );
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut reader = csv::Reader::from_path("demos/data/compass_turn.csv")?;
    let mut events = Vec::new();
    for result in reader.deserialize() {
        let record: Record = result?;
        let kind = match record.sensor.as_str() {
            "accelerometer" => SensorKind::Accelerometer,
            "magnetometer" => SensorKind::Magnetometer,
            other => return Err(format!("unknown sensor {other}").into()),
        };
        let values = nalgebra::Vector3::new(record.x, record.y, record.z);
        let event = SensorEvent::try_new(kind, values)?;
        events.push((record.time, event));
    }
    println!("Replaying {} sensor events", events.len());

    let (shared, queue) = SharedEstimator::new(HeadingEstimator::new());
    shared.start_consuming();

    // The sensor thread owns the estimator; the UI loop below ends when it
    // finishes and drops it
    let sensor = shared;
    let sensor_thread = thread::spawn(move || {
        let mut last_time = 0.0;
        for (time, event) in events {
            thread::sleep(Duration::from_secs_f32((time - last_time).max(0.0) / 10.0));
            last_time = time;
            sensor.on_sensor_event(event);
        }
        sensor.stop_consuming();
    });

    let mut compass = ConsoleCompass::default();
    queue.run(&mut compass);
    sensor_thread.join().map_err(|_| "sensor thread panicked")?;

    println!("Presented {} heading updates", compass.updates);
    Ok(())
}
