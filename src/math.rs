//! Angle utilities for the heading fusion library

use nalgebra::Vector3;

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Fold a signed angle in degrees into the display range
///
/// Values in [0, 180] pass through. Anything else goes through
/// `180 + (180 + value)`, which maps (-180, 0) onto (180, 360] and -180 onto
/// 180. The upper end is closed in `f32`: negative values smaller in
/// magnitude than about 1e-5 round to exactly 360.0. Inputs above 180 or
/// below -180 are folded a second time and land outside [0, 360]: 200
/// becomes 560. Yaw taken from a rotation matrix never leaves [-180, 180], so
/// that branch is not reached by the estimator.
///
/// # Example
/// ```
/// use heading_fusion::normalize_degree;
///
/// assert_eq!(normalize_degree(90.0), 90.0);
/// assert_eq!(normalize_degree(-30.0), 330.0);
/// assert_eq!(normalize_degree(200.0), 560.0);
/// ```
pub fn normalize_degree(value: f32) -> f32 {
    if (0.0..=180.0).contains(&value) {
        value
    } else {
        180.0 + (180.0 + value)
    }
}

/// Whether every component is finite
pub(crate) fn is_finite(vector: &Vector3<f32>) -> bool {
    vector.iter().all(|v| v.is_finite())
}
