//! Dew point virtual sensor
//!
//! Derives the dew point from an existing temperature sensor and an existing
//! relative humidity sensor, and publishes it as a sensor of its own.
//! Designed for firmware event loops with limited resources.
//!
//! Key constraints:
//! - No heap allocation
//! - Constant-time update, pure arithmetic
//! - One cooperative thread: no locks, `Cell` state
//!
//! ```rust
//! use dewpoint_core::{Component, DewPointEstimator, Sensor, SensorInfo};
//!
//! let temperature = Sensor::new(SensorInfo::temperature("Outdoor Temperature"));
//! let humidity = Sensor::new(SensorInfo::humidity("Outdoor Humidity"));
//! let dew_point = DewPointEstimator::new(&temperature, &humidity);
//! dew_point.setup()?;
//!
//! // Drivers publish; the estimator follows
//! temperature.publish_state(25.0);
//! humidity.publish_state(60.0);
//! assert_eq!(dew_point.state().value(), Some(16.7));
//! # Ok::<(), dewpoint_core::DewPointError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod component;
pub mod constants;
pub mod errors;
pub mod estimator;
pub mod magnus;
pub mod sensor;
pub mod time;

// Public API
pub use component::{setup_priority, Component, Scheduler};
pub use errors::{DewPointError, DewPointResult, Input};
pub use estimator::{DewPointEstimator, UpdateMode};
pub use magnus::MagnusCoefficients;
pub use sensor::{DeviceClass, Sensor, SensorInfo, SensorState, StateClass, StateObserver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
