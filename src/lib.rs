#![cfg_attr(not(feature = "std"), no_std)]

//! Heading Fusion - smoothed compass heading from an accelerometer and a magnetometer
//!
//! This library turns two raw 3-axis sensor streams into a stable compass
//! bearing suitable for driving a rotating pointer. Each stream is passed
//! through a single-pole low-pass filter, the filtered pair is turned into an
//! East/North/Up rotation matrix, and the yaw of that matrix is folded into a
//! display bearing.
//!
//! # Features
//!
//! - Exponential smoothing of gravity and geomagnetic vectors
//! - Rotation matrix and orientation extraction with free-fall rejection
//! - Display-bearing normalization with an explicit two-branch fold
//! - Thread-safe wrapper with a FIFO hand-off to a presentation thread (`std`)
//! - Day/night theme selection from an ambient light sensor
//! - `no_std` compatible core when the default `std` feature is disabled
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use heading_fusion::HeadingEstimator;
//!
//! let mut estimator = HeadingEstimator::new();
//!
//! let mut last = None;
//! for _ in 0..200 {
//!     estimator.ingest_accelerometer(Vector3::new(0.0, 0.0, 9.8)); // m/s²
//!     last = estimator.compute_heading().or(last);
//!     estimator.ingest_magnetometer(Vector3::new(0.0, 50.0, 0.0)); // µT
//!     last = estimator.compute_heading().or(last);
//! }
//!
//! let sample = last.unwrap();
//! assert!(sample.current.abs() < 1.0); // device flat, pointing north
//! ```

pub mod error;
pub mod estimator;
pub mod filter;
mod math;
pub mod orientation;
#[cfg(feature = "std")]
pub mod presentation;
#[cfg(feature = "std")]
pub mod shared;
pub mod theme;
mod types;

// Re-export all public types and functions
pub use error::{Error, Result};
pub use estimator::HeadingEstimator;
pub use filter::LowPassFilter;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, normalize_degree};
pub use orientation::{Orientation, rotation_matrix};
#[cfg(feature = "std")]
pub use presentation::{HeadingPresenter, PointerAnimation, PresentationQueue, PresentationUpdate};
#[cfg(feature = "std")]
pub use shared::SharedEstimator;
pub use theme::ThemeController;
pub use types::*;
