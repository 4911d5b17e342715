//! Heading estimator: smoothing, rotation matrix, display bearing

use log::{debug, trace, warn};
use nalgebra::Vector3;

use crate::error::Result;
use crate::filter::LowPassFilter;
use crate::math::{RAD_TO_DEG, is_finite, normalize_degree};
use crate::orientation::{Orientation, rotation_matrix};
use crate::types::{EstimatorSettings, HeadingSample, SensorEvent, SensorKind};

/// Heading estimator
///
/// Owns the smoothed gravity and geomagnetic vectors and turns them into
/// display bearings. Each raw sample goes through [`LowPassFilter`]; after
/// every ingest [`compute_heading`](Self::compute_heading) tries to build a
/// rotation matrix from the smoothed pair and, if it can, emits a
/// [`HeadingSample`].
///
/// This type is single-threaded. Wrap it in
/// [`SharedEstimator`](crate::SharedEstimator) when samples arrive from a
/// sensor thread.
#[derive(Debug, Clone)]
pub struct HeadingEstimator {
    settings: EstimatorSettings,
    gravity: LowPassFilter,
    geomagnetic: LowPassFilter,
    /// Last emitted bearing, starting point of the next pointer animation
    previous_heading: f32,
    /// Whether the last computation produced a matrix
    has_signal: bool,
}

impl HeadingEstimator {
    /// Create an estimator with default settings
    pub fn new() -> Self {
        Self::from_valid_settings(EstimatorSettings::default())
    }

    /// Create an estimator with the given settings
    ///
    /// Fails when the settings do not validate.
    pub fn with_settings(settings: EstimatorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::from_valid_settings(settings))
    }

    fn from_valid_settings(settings: EstimatorSettings) -> Self {
        Self {
            settings,
            gravity: LowPassFilter::new(settings.alpha),
            geomagnetic: LowPassFilter::new(settings.alpha),
            previous_heading: 0.0,
            has_signal: false,
        }
    }

    /// Settings this estimator was built with
    pub fn settings(&self) -> EstimatorSettings {
        self.settings
    }

    /// Blend an accelerometer sample into the gravity vector
    ///
    /// Samples with NaN or infinite components are dropped.
    pub fn ingest_accelerometer(&mut self, sample: Vector3<f32>) {
        if !is_finite(&sample) {
            warn!("dropping non-finite accelerometer sample {:?}", sample);
            return;
        }
        self.gravity.update(sample);
    }

    /// Blend a magnetometer sample into the geomagnetic vector
    ///
    /// Samples with NaN or infinite components are dropped.
    pub fn ingest_magnetometer(&mut self, sample: Vector3<f32>) {
        if !is_finite(&sample) {
            warn!("dropping non-finite magnetometer sample {:?}", sample);
            return;
        }
        self.geomagnetic.update(sample);
    }

    /// Ingest a tagged event and compute the heading in one step
    ///
    /// # Example
    /// ```
    /// use heading_fusion::{HeadingEstimator, SensorEvent};
    ///
    /// let mut estimator = HeadingEstimator::new();
    ///
    /// // No magnetometer yet, nothing to emit
    /// assert!(estimator.ingest(SensorEvent::accelerometer(0.0, 0.0, 9.8)).is_none());
    /// ```
    pub fn ingest(&mut self, event: SensorEvent) -> Option<HeadingSample> {
        match event.kind {
            SensorKind::Accelerometer => self.ingest_accelerometer(event.values),
            SensorKind::Magnetometer => self.ingest_magnetometer(event.values),
        }
        self.compute_heading()
    }

    /// Derive a heading from the current smoothed vectors
    ///
    /// # Returns
    /// `None` while there is not enough signal (no magnetometer data yet,
    /// free fall, field parallel to gravity). Otherwise the new bearing
    /// together with the one emitted before it.
    pub fn compute_heading(&mut self) -> Option<HeadingSample> {
        let Some(orientation) = self.orientation() else {
            if self.has_signal {
                debug!("heading signal lost");
                self.has_signal = false;
            }
            return None;
        };
        if !self.has_signal {
            debug!("heading signal acquired");
            self.has_signal = true;
        }

        let current = normalize_degree(-(orientation.azimuth * RAD_TO_DEG));
        let sample = HeadingSample {
            previous: self.previous_heading,
            current,
        };
        self.previous_heading = current;

        trace!("heading {:.1}° (from {:.1}°)", sample.current, sample.previous);
        Some(sample)
    }

    /// Orientation of the current smoothed pair, if one can be derived
    ///
    /// Does not emit or touch the previous heading.
    pub fn orientation(&self) -> Option<Orientation> {
        rotation_matrix(&self.settings, self.gravity.value(), self.geomagnetic.value())
            .map(|matrix| Orientation::from_rotation_matrix(&matrix))
    }

    /// Smoothed gravity vector
    pub fn gravity(&self) -> Vector3<f32> {
        self.gravity.value()
    }

    /// Smoothed geomagnetic vector
    pub fn geomagnetic(&self) -> Vector3<f32> {
        self.geomagnetic.value()
    }

    /// Last emitted bearing in degrees (0 before the first emission)
    pub fn previous_heading(&self) -> f32 {
        self.previous_heading
    }

    /// Clear both vectors and the previous heading
    pub fn reset(&mut self) {
        self.gravity.reset();
        self.geomagnetic.reset();
        self.previous_heading = 0.0;
        self.has_signal = false;
    }
}

impl Default for HeadingEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn converge(
        estimator: &mut HeadingEstimator,
        gravity: Vector3<f32>,
        field: Vector3<f32>,
    ) -> Option<HeadingSample> {
        let mut last = None;
        for _ in 0..300 {
            estimator.ingest_accelerometer(gravity);
            last = estimator.compute_heading().or(last);
            estimator.ingest_magnetometer(field);
            last = estimator.compute_heading().or(last);
        }
        last
    }

    #[test]
    fn test_new_estimator() {
        let estimator = HeadingEstimator::new();
        assert_eq!(estimator.gravity(), Vector3::zeros());
        assert_eq!(estimator.geomagnetic(), Vector3::zeros());
        assert_eq!(estimator.previous_heading(), 0.0);
        assert!(estimator.orientation().is_none());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EstimatorSettings {
            alpha: 1.0,
            ..Default::default()
        };
        assert_eq!(
            HeadingEstimator::with_settings(settings).unwrap_err(),
            Error::InvalidAlpha(1.0)
        );
    }

    #[test]
    fn test_accelerometer_only_never_emits() {
        let mut estimator = HeadingEstimator::new();
        for _ in 0..500 {
            assert!(estimator.ingest(SensorEvent::accelerometer(0.3, -0.2, 9.8)).is_none());
        }
        assert!((estimator.gravity().z - 9.8).abs() < 0.01);
    }

    #[test]
    fn test_magnetometer_only_never_emits() {
        let mut estimator = HeadingEstimator::new();
        for _ in 0..500 {
            assert!(estimator.ingest(SensorEvent::magnetometer(0.0, 50.0, -30.0)).is_none());
        }
    }

    #[test]
    fn test_flat_pointing_north() {
        let mut estimator = HeadingEstimator::new();
        let sample = converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(0.0, 50.0, 0.0),
        )
        .expect("heading should be emitted");

        assert!(sample.current.abs() < 1.0, "expected ~0°, got {}", sample.current);
    }

    #[test]
    fn test_flat_pointing_east_and_west() {
        // Azimuth is negated before folding, so facing east reads 270
        let mut estimator = HeadingEstimator::new();
        let east = converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(-50.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((east.current - 270.0).abs() < 1.0, "got {}", east.current);

        let mut estimator = HeadingEstimator::new();
        let west = converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(50.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((west.current - 90.0).abs() < 1.0, "got {}", west.current);
    }

    #[test]
    fn test_heading_a_hair_off_north_reads_360() {
        // Negated yaw of about -1e-6° folds to exactly 360.0 in f32
        let mut estimator = HeadingEstimator::new();
        let sample = converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(-1e-6, 50.0, 0.0),
        )
        .unwrap();

        assert_eq!(sample.current, 360.0);
    }

    #[test]
    fn test_previous_heading_chains() {
        let mut estimator = HeadingEstimator::new();
        converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(50.0, 0.0, 0.0),
        );
        let before = estimator.previous_heading();

        let sample = estimator
            .ingest(SensorEvent::magnetometer(50.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(sample.previous, before);
        assert_eq!(estimator.previous_heading(), sample.current);
    }

    #[test]
    fn test_non_finite_sample_leaves_state_untouched() {
        let mut estimator = HeadingEstimator::new();
        estimator.ingest_accelerometer(Vector3::new(0.0, 0.0, 9.8));
        let gravity = estimator.gravity();

        estimator.ingest_accelerometer(Vector3::new(f32::NAN, 0.0, 0.0));
        estimator.ingest_magnetometer(Vector3::new(0.0, f32::INFINITY, 0.0));

        assert_eq!(estimator.gravity(), gravity);
        assert_eq!(estimator.geomagnetic(), Vector3::zeros());
    }

    #[test]
    fn test_signal_lost_and_recovered() {
        let mut estimator = HeadingEstimator::new();
        let gravity = Vector3::new(0.0, 0.0, 9.8);
        assert!(converge(&mut estimator, gravity, Vector3::new(0.0, 50.0, 0.0)).is_some());

        // Field swings into line with gravity: no heading until it leaves again
        let mut lost = false;
        for _ in 0..400 {
            if estimator.ingest(SensorEvent::magnetometer(0.0, 0.0, 50.0)).is_none() {
                lost = true;
                break;
            }
        }
        assert!(lost);

        assert!(converge(&mut estimator, gravity, Vector3::new(0.0, 50.0, 0.0)).is_some());
    }

    #[test]
    fn test_reset() {
        let mut estimator = HeadingEstimator::new();
        converge(
            &mut estimator,
            Vector3::new(0.0, 0.0, 9.8),
            Vector3::new(50.0, 0.0, 0.0),
        );
        assert!(estimator.previous_heading() > 0.0);

        estimator.reset();
        assert_eq!(estimator.gravity(), Vector3::zeros());
        assert_eq!(estimator.geomagnetic(), Vector3::zeros());
        assert_eq!(estimator.previous_heading(), 0.0);
        assert!(estimator.compute_heading().is_none());
    }
}
