//! Error Types for Dew Point Estimation
//!
//! ## Design Philosophy
//!
//! The estimator runs inside a cooperative scheduler with tight timing budgets, so
//! errors follow the same rules as the rest of the crate:
//!
//! 1. **Small Size**: Variants carry a few words at most. The last error is kept in a
//!    `Cell` on the estimator for diagnostics.
//!
//! 2. **No Heap Allocation**: Messages are `&'static str`, never `String`.
//!
//! 3. **Copy Semantics**: Errors are returned by value from the hot path.
//!
//! 4. **Never Fatal**: No variant stops the component. A failed cycle suppresses the
//!    numeric publication and the next cycle starts from scratch.
//!
//! ## Error Categories
//!
//! ### Estimation
//! - `UpstreamUnavailable`: temperature or humidity has not reported, or reported NaN
//! - `InvalidDomain`: the Magnus formula is undefined for the inputs (RH <= 0), the
//!   humidity exceeds the configured ceiling, or the result is not finite
//!
//! ### Wiring
//! - `ObserverLimit`: a sensor has no free subscription slot
//! - `SchedulerFull`: the scheduler has no free component slot
//!
//! Wiring errors only happen during setup and are reported to the caller.
//! Estimation errors are absorbed by [`DewPointEstimator::update`](crate::DewPointEstimator::update)
//! and surface as an unavailable output.
//!
//! ```rust
//! use dewpoint_core::{magnus, DewPointError};
//!
//! match magnus::dew_point(20.0, 0.0) {
//!     Ok(_) => unreachable!(),
//!     Err(DewPointError::InvalidDomain { reason, .. }) => {
//!         // log and wait for the next reading
//!         let _ = reason;
//!     }
//!     Err(_) => {}
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for dew point operations
pub type DewPointResult<T> = Result<T, DewPointError>;

/// Which upstream measurement an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Air temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Temperature => f.write_str("temperature"),
            Input::Humidity => f.write_str("humidity"),
        }
    }
}

/// Dew point errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DewPointError {
    /// An upstream sensor has no valid reading
    #[error("Upstream {input} sensor unavailable")]
    UpstreamUnavailable {
        /// The missing measurement
        input: Input,
    },

    /// Inputs outside the domain of the formula, or a non-finite result
    #[error("Invalid domain: {reason} ({value})")]
    InvalidDomain {
        /// What went wrong
        reason: &'static str,
        /// The offending value (input or result)
        value: f32,
    },

    /// All subscription slots of a sensor are taken
    #[error("Sensor observer limit reached ({capacity})")]
    ObserverLimit {
        /// Number of slots per sensor
        capacity: usize,
    },

    /// All component slots of a scheduler are taken
    #[error("Scheduler full ({capacity} components)")]
    SchedulerFull {
        /// Number of component slots
        capacity: usize,
    },
}

impl DewPointError {
    /// True for errors raised by an update cycle, as opposed to wiring errors
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::InvalidDomain { .. }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Input {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Input::Temperature => defmt::write!(fmt, "temperature"),
            Input::Humidity => defmt::write!(fmt, "humidity"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DewPointError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::UpstreamUnavailable { input } =>
                defmt::write!(fmt, "Upstream {} sensor unavailable", input),
            Self::InvalidDomain { reason, value } =>
                defmt::write!(fmt, "Invalid domain: {} ({})", reason, value),
            Self::ObserverLimit { capacity } =>
                defmt::write!(fmt, "Observer limit reached ({})", capacity),
            Self::SchedulerFull { capacity } =>
                defmt::write!(fmt, "Scheduler full ({})", capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors() {
        assert!(DewPointError::UpstreamUnavailable { input: Input::Humidity }.is_transient());
        assert!(DewPointError::InvalidDomain { reason: "x", value: 0.0 }.is_transient());
        assert!(!DewPointError::ObserverLimit { capacity: 4 }.is_transient());
        assert!(!DewPointError::SchedulerFull { capacity: 8 }.is_transient());
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_messages() {
        let err = DewPointError::UpstreamUnavailable { input: Input::Temperature };
        assert_eq!(err.to_string(), "Upstream temperature sensor unavailable");

        let err = DewPointError::InvalidDomain {
            reason: "relative humidity must be above zero",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "Invalid domain: relative humidity must be above zero (0)");
    }
}
