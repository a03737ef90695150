//! Constants for Dewpoint Core
//!
//! All numeric values used by the estimator and its sensor plumbing live here,
//! each with its unit in the name and a source where one exists.
//!
//! ## Organization
//!
//! - **Physics**: Magnus coefficients and plausible input ranges
//! - **Sensors**: Output metadata defaults and fixed capacities
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the standard or datasheet a value comes from
//! 3. Use descriptive names that include units

/// Magnus formula coefficients and plausibility limits.
pub mod physics;

/// Sensor metadata defaults and buffer capacities.
pub mod sensors;
