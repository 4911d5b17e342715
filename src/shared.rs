//! Thread-safe estimator for sensor callbacks
//!
//! Accelerometer and magnetometer deliveries may arrive on any thread. Each
//! delivery takes one lock for the whole smooth + fuse + post cycle, so the
//! rotation matrix never sees a half-updated pair and samples reach the
//! presentation queue in the order their cycles completed.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use heading_fusion::{HeadingEstimator, PresentationUpdate, SensorEvent, SharedEstimator};
//!
//! let (shared, queue) = SharedEstimator::new(HeadingEstimator::new());
//! let shared = Arc::new(shared);
//! shared.start_consuming();
//!
//! let sensor = Arc::clone(&shared);
//! thread::spawn(move || {
//!     for _ in 0..100 {
//!         sensor.on_sensor_event(SensorEvent::accelerometer(0.0, 0.0, 9.8));
//!         sensor.on_sensor_event(SensorEvent::magnetometer(0.0, 50.0, 0.0));
//!     }
//! })
//! .join()
//! .unwrap();
//!
//! // On the UI thread
//! let mut last = None;
//! queue.run_pending(&mut |update: PresentationUpdate| last = Some(update.readout));
//! assert_eq!(last.as_deref(), Some("0°"));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Sender, unbounded};
use log::{debug, info};
use parking_lot::Mutex;

use crate::estimator::HeadingEstimator;
use crate::presentation::PresentationQueue;
use crate::types::{HeadingSample, SensorEvent};

/// Heading estimator shared between sensor callbacks
pub struct SharedEstimator {
    estimator: Mutex<HeadingEstimator>,
    consuming: AtomicBool,
    sender: Sender<HeadingSample>,
}

impl SharedEstimator {
    /// Wrap an estimator and create its presentation queue
    ///
    /// The estimator starts stopped; call
    /// [`start_consuming`](Self::start_consuming) once the host has
    /// registered its sensors.
    pub fn new(estimator: HeadingEstimator) -> (Self, PresentationQueue) {
        let (sender, receiver) = unbounded();
        let shared = Self {
            estimator: Mutex::new(estimator),
            consuming: AtomicBool::new(false),
            sender,
        };
        (shared, PresentationQueue::new(receiver))
    }

    /// Accept samples from now on
    pub fn start_consuming(&self) {
        if !self.consuming.swap(true, Ordering::AcqRel) {
            info!("heading estimator started");
        }
    }

    /// Discard samples from now on
    pub fn stop_consuming(&self) {
        if self.consuming.swap(false, Ordering::AcqRel) {
            info!("heading estimator stopped");
        }
    }

    /// Whether samples are currently accepted
    pub fn is_consuming(&self) -> bool {
        self.consuming.load(Ordering::Acquire)
    }

    /// Sensor callback entry point
    ///
    /// # Returns
    /// The emitted sample, if this delivery produced one. It has already
    /// been posted to the presentation queue.
    pub fn on_sensor_event(&self, event: SensorEvent) -> Option<HeadingSample> {
        if !self.is_consuming() {
            return None;
        }

        let mut estimator = self.estimator.lock();
        // A stop may have landed while this delivery waited for the lock
        if !self.is_consuming() {
            return None;
        }
        let sample = estimator.ingest(event)?;
        // Post under the lock so queue order matches update order
        if self.sender.send(sample).is_err() {
            debug!("presentation queue dropped, heading not posted");
        }
        Some(sample)
    }

    /// Copy of the estimator's current state
    pub fn snapshot(&self) -> HeadingEstimator {
        self.estimator.lock().clone()
    }

    /// Clear the estimator's smoothed vectors and previous heading
    pub fn reset(&self) {
        self.estimator.lock().reset();
    }
}
