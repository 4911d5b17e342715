//! Error types for the heading fusion library
//!
//! Fusion itself never fails: a missing rotation matrix just means there is
//! not enough signal yet. These errors cover configuration and input
//! validation at the edges.

use crate::types::SensorKind;

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

/// Heading fusion error types
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// Smoothing constant outside [0, 1)
    #[error("smoothing alpha must be in [0, 1), got {0}")]
    InvalidAlpha(f32),

    /// Negative or non-finite threshold
    #[error("invalid threshold {name}: {value}")]
    InvalidThreshold {
        /// Settings field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Sample with a NaN or infinite component
    #[error("non-finite {0:?} sample")]
    NonFiniteSample(SensorKind),
}
