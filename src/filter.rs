//! Exponential smoothing for 3-axis sensor streams

use nalgebra::Vector3;

use crate::types::DEFAULT_ALPHA;

/// Single-pole low-pass filter over a 3-axis vector
///
/// Every update computes `value = alpha * value + (1 - alpha) * sample` per
/// axis. The state starts at zero and is only ever changed through that
/// formula, so it carries memory of every sample it has seen.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use heading_fusion::LowPassFilter;
///
/// let mut filter = LowPassFilter::new(0.5);
/// filter.update(Vector3::new(2.0, 0.0, 0.0));
/// assert_eq!(filter.value(), Vector3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    alpha: f32,
    value: Vector3<f32>,
}

impl LowPassFilter {
    /// Create a filter with the given decay constant and a zero state
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            value: Vector3::zeros(),
        }
    }

    /// Blend a new sample into the state
    pub fn update(&mut self, sample: Vector3<f32>) {
        let alpha = self.alpha;
        for (value, sample) in self.value.iter_mut().zip(sample.iter()) {
            *value = alpha * *value + (1.0 - alpha) * sample;
        }
    }

    /// Current smoothed value
    pub fn value(&self) -> Vector3<f32> {
        self.value
    }

    /// Decay constant
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether no sample has moved the state off zero yet
    pub fn is_zero(&self) -> bool {
        self.value == Vector3::zeros()
    }

    /// Return the state to zero
    pub fn reset(&mut self) {
        self.value = Vector3::zeros();
    }
}

impl Default for LowPassFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
