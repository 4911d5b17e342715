//! Rotation matrix and orientation extraction from gravity and magnetic field
//!
//! The matrix rows are the world East, North and Up axes expressed in device
//! coordinates, built the same way as a tilt-compensated compass: the cross
//! product of the field and gravity gives East, and Up × East gives North.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use heading_fusion::{EstimatorSettings, Orientation, rotation_matrix};
//!
//! let gravity = Vector3::new(0.0, 0.0, 9.8);   // device lying flat
//! let field = Vector3::new(0.0, 50.0, 0.0);    // top edge pointing north
//!
//! let matrix = rotation_matrix(&EstimatorSettings::default(), gravity, field).unwrap();
//! let orientation = Orientation::from_rotation_matrix(&matrix);
//! assert!(orientation.azimuth.abs() < 1e-6);
//! ```

#[cfg(not(feature = "std"))]
use nalgebra::{ComplexField, RealField};
use nalgebra::{Matrix3, Vector3};

use crate::math::RAD_TO_DEG;
use crate::types::EstimatorSettings;

/// Build the device-to-world rotation matrix
///
/// # Arguments
/// * `settings` - Supplies the free-fall and weak-field guards
/// * `gravity` - Smoothed accelerometer reading (m/s²)
/// * `geomagnetic` - Smoothed magnetometer reading (µT)
///
/// # Returns
/// `None` when gravity is weaker than `free_fall_threshold`, or when the
/// horizontal field `geomagnetic × gravity` is shorter than
/// `min_horizontal_field`. Zero vectors and collinear vectors fall into one
/// of the two cases.
pub fn rotation_matrix(
    settings: &EstimatorSettings,
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
) -> Option<Matrix3<f32>> {
    let gravity_squared = gravity.magnitude_squared();
    let free_fall = settings.free_fall_threshold;
    if gravity_squared < free_fall * free_fall {
        return None;
    }

    // East: field × gravity
    let east = geomagnetic.cross(&gravity);
    let east_norm = east.magnitude();
    if !(east_norm >= settings.min_horizontal_field) || east_norm == 0.0 {
        return None;
    }
    let east = east / east_norm;

    // Up: normalized gravity (accelerometer reads the reaction force)
    let up = gravity / gravity_squared.sqrt();

    // North: up × east
    let north = up.cross(&east);

    Some(Matrix3::from_rows(&[
        east.transpose(),
        north.transpose(),
        up.transpose(),
    ]))
}

/// Device orientation angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    /// Rotation about the vertical axis, (-π, π], 0 = magnetic north
    pub azimuth: f32,
    /// Rotation about the device X axis, [-π/2, π/2]
    pub pitch: f32,
    /// Rotation about the device Y axis, (-π, π]
    pub roll: f32,
}

impl Orientation {
    /// Extract azimuth, pitch and roll from a rotation matrix
    pub fn from_rotation_matrix(matrix: &Matrix3<f32>) -> Self {
        Self {
            azimuth: matrix[(0, 1)].atan2(matrix[(1, 1)]),
            pitch: (-matrix[(2, 1)]).clamp(-1.0, 1.0).asin(),
            roll: (-matrix[(2, 0)]).atan2(matrix[(2, 2)]),
        }
    }

    /// Azimuth in degrees, [-180, 180]
    pub fn azimuth_degrees(&self) -> f32 {
        self.azimuth * RAD_TO_DEG
    }

    /// All three angles in degrees as (azimuth, pitch, roll)
    pub fn to_degrees(&self) -> Vector3<f32> {
        Vector3::new(self.azimuth, self.pitch, self.roll) * RAD_TO_DEG
    }
}
