//! Core types and settings for the heading fusion library

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::math::is_finite;

/// Default smoothing decay applied to both sensor streams
pub const DEFAULT_ALPHA: f32 = 0.96;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Light level below which the automatic theme switches to night, in lux
pub const NIGHT_LUX_THRESHOLD: f32 = 50.0;

/// Heading estimator settings
///
/// Fixed for the lifetime of an estimator. The defaults reproduce the
/// behaviour of a typical handset compass: strong smoothing, and the usual
/// free-fall and weak-field guards on the rotation matrix.
///
/// # Example
/// ```
/// use heading_fusion::{EstimatorSettings, HeadingEstimator};
///
/// let settings = EstimatorSettings {
///     alpha: 0.9, // faster response, more jitter
///     ..Default::default()
/// };
/// let estimator = HeadingEstimator::with_settings(settings).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorSettings {
    /// Low-pass decay constant in [0, 1)
    ///
    /// Each update keeps `alpha` of the previous value and takes `1 - alpha`
    /// of the new sample. Larger values reject more noise but respond slower.
    pub alpha: f32,
    /// Minimum gravity magnitude in m/s²
    ///
    /// Below this the device is considered in free fall and no rotation
    /// matrix is produced.
    pub free_fall_threshold: f32,
    /// Minimum magnitude of `geomagnetic × gravity`
    ///
    /// Guards against a vanishing horizontal field (vectors collinear, or no
    /// magnetometer data yet).
    pub min_horizontal_field: f32,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            free_fall_threshold: 0.1 * STANDARD_GRAVITY,
            min_horizontal_field: 0.1,
        }
    }
}

impl EstimatorSettings {
    /// Check that the settings describe a stable filter
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.alpha) {
            return Err(Error::InvalidAlpha(self.alpha));
        }
        if !self.free_fall_threshold.is_finite() || self.free_fall_threshold < 0.0 {
            return Err(Error::InvalidThreshold {
                name: "free_fall_threshold",
                value: self.free_fall_threshold,
            });
        }
        if !self.min_horizontal_field.is_finite() || self.min_horizontal_field < 0.0 {
            return Err(Error::InvalidThreshold {
                name: "min_horizontal_field",
                value: self.min_horizontal_field,
            });
        }
        Ok(())
    }
}

/// One heading update
///
/// `current` is the display bearing in degrees; `previous` is the bearing
/// emitted before it (0 before the first emission) so that a pointer can be
/// animated between the two.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingSample {
    /// Bearing emitted by the previous successful fusion, in degrees
    pub previous: f32,
    /// Bearing from this fusion, in degrees
    pub current: f32,
}

/// Sensor that produced a raw sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    /// Accelerometer, m/s²
    Accelerometer,
    /// Magnetometer, µT
    Magnetometer,
}

/// Raw sample as delivered by the host sensor subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorEvent {
    /// Which sensor produced the values
    pub kind: SensorKind,
    /// Three axis values in device coordinates
    pub values: Vector3<f32>,
}

impl SensorEvent {
    /// Build an event without checking the values
    pub fn new(kind: SensorKind, values: Vector3<f32>) -> Self {
        Self { kind, values }
    }

    /// Build an event, rejecting NaN and infinite components
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use heading_fusion::{SensorEvent, SensorKind};
    ///
    /// assert!(SensorEvent::try_new(SensorKind::Accelerometer, Vector3::new(0.0, 0.0, 9.8)).is_ok());
    /// assert!(SensorEvent::try_new(SensorKind::Magnetometer, Vector3::new(f32::NAN, 0.0, 0.0)).is_err());
    /// ```
    pub fn try_new(kind: SensorKind, values: Vector3<f32>) -> Result<Self> {
        if is_finite(&values) {
            Ok(Self::new(kind, values))
        } else {
            Err(Error::NonFiniteSample(kind))
        }
    }

    /// Accelerometer event from raw components
    pub fn accelerometer(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Accelerometer, Vector3::new(x, y, z))
    }

    /// Magnetometer event from raw components
    pub fn magnetometer(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Magnetometer, Vector3::new(x, y, z))
    }
}

/// Day/night UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

/// Automatic theme settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThemeSettings {
    /// Light level in lux below which night mode is selected
    pub night_threshold: f32,
    /// Whether the light sensor drives the mode at start-up
    pub auto: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            night_threshold: NIGHT_LUX_THRESHOLD,
            auto: false,
        }
    }
}
