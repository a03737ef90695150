//! Physical Constants for Dew Point Estimation
//!
//! Coefficients of the Magnus approximation and the input ranges over which it is
//! known to be accurate. Inputs outside these ranges are still computed; the ranges
//! only feed diagnostics.

// ===== MAGNUS COEFFICIENTS =====

/// Magnus coefficient `a` (dimensionless), Sonntag 1990 set.
///
/// Accuracy ±0.35 °C between 0 °C and 60 °C.
///
/// Source: Sonntag, D. (1990), Important new values of the physical constants
pub const MAGNUS_A: f32 = 17.62;

/// Magnus coefficient `b` (°C), Sonntag 1990 set.
///
/// Source: Sonntag, D. (1990)
pub const MAGNUS_B_C: f32 = 243.12;

/// Magnus coefficient `a` (dimensionless), Tetens/Murray set.
///
/// Widely used in consumer firmware. Valid roughly between 0 °C and 50 °C.
///
/// Source: Murray, F. W. (1967), On the computation of saturation vapor pressure
pub const TETENS_A: f32 = 17.27;

/// Magnus coefficient `b` (°C), Tetens/Murray set.
///
/// Source: Murray, F. W. (1967)
pub const TETENS_B_C: f32 = 237.7;

// ===== PLAUSIBLE INPUT RANGES =====

/// Lowest air temperature considered plausible for the estimator (°C).
pub const PLAUSIBLE_TEMP_MIN_C: f32 = -50.0;

/// Highest air temperature considered plausible for the estimator (°C).
pub const PLAUSIBLE_TEMP_MAX_C: f32 = 60.0;

/// Relative humidity at saturation (%).
///
/// Readings above this are supersaturation or sensor drift.
pub const SATURATION_HUMIDITY_PCT: f32 = 100.0;
