//! Magnus Approximation of the Dew Point
//!
//! ## Physics Background
//!
//! The dew point is the temperature to which air must cool, at constant pressure and
//! moisture content, for water vapour to condense. The Magnus formula approximates
//! saturation vapour pressure as `E(T) = c · exp(a·T / (b + T))`, which inverts to a
//! closed form for the dew point:
//!
//! ```text
//! γ(T, RH) = (a × T) / (b + T) + ln(RH / 100)
//! Td       = (b × γ) / (a − γ)
//!
//! Where:
//! - T  = air temperature (°C)
//! - RH = relative humidity (%)
//! - a, b = Magnus coefficients
//! - Td = dew point temperature (°C)
//! ```
//!
//! ### Properties
//!
//! - At RH = 100 %, `ln(1) = 0` and `Td = T` exactly
//! - For RH < 100 %, `Td < T`: air below saturation must cool to condense
//! - `Td` increases with RH at fixed T, since `γ` does and `Td(γ)` is increasing
//!   below `γ = a`
//! - RH = 0 has no dew point: `ln(0) = −∞`
//!
//! ### Worked Example
//!
//! ```text
//! T = 25 °C, RH = 60 %
//! γ  = (17.62 × 25) / (243.12 + 25) + ln(0.6) = 1.6429 − 0.5108 = 1.1321
//! Td = (243.12 × 1.1321) / (17.62 − 1.1321) ≈ 16.7 °C
//! ```
//!
//! ## Coefficient Sets
//!
//! | Set     | a     | b (°C)  | Range      | Accuracy  |
//! |---------|-------|---------|------------|-----------|
//! | Sonntag | 17.62 | 243.12  | 0 – 60 °C  | ±0.35 °C  |
//! | Tetens  | 17.27 | 237.7   | 0 – 50 °C  | ±0.4 °C   |
//!
//! Sonntag is the default. Tetens matches the values hard-coded by many consumer
//! firmwares and is offered for parity with them.
//!
//! ## No Clamping
//!
//! Inputs outside the nominal ranges are computed as-is. The formula degrades smoothly
//! below 0 °C (where it approximates the dew point over water, not the frost point).
//! Only mathematically undefined inputs and non-finite results are rejected.

use libm::{logf, roundf};

use crate::{
    constants::{
        physics::{MAGNUS_A, MAGNUS_B_C, TETENS_A, TETENS_B_C},
        sensors::MAX_ACCURACY_DECIMALS,
    },
    errors::{DewPointError, DewPointResult},
};

/// Coefficients `a` and `b` of the Magnus formula
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagnusCoefficients {
    /// Dimensionless coefficient
    pub a: f32,
    /// Temperature coefficient in °C
    pub b: f32,
}

impl MagnusCoefficients {
    /// Sonntag 1990, accurate to ±0.35 °C over 0–60 °C
    pub const SONNTAG: Self = Self { a: MAGNUS_A, b: MAGNUS_B_C };

    /// Tetens/Murray set
    pub const TETENS: Self = Self { a: TETENS_A, b: TETENS_B_C };

    /// Intermediate term `γ = a·T/(b+T) + ln(RH/100)`
    ///
    /// Not checked: RH <= 0 yields `-inf` or NaN.
    pub fn gamma(&self, temp_c: f32, rh_percent: f32) -> f32 {
        (self.a * temp_c) / (self.b + temp_c) + logf(rh_percent / 100.0)
    }

    /// Dew point in °C for the given temperature and relative humidity
    pub fn dew_point(&self, temp_c: f32, rh_percent: f32) -> DewPointResult<f32> {
        // Also rejects NaN humidity
        if !(rh_percent > 0.0) {
            return Err(DewPointError::InvalidDomain {
                reason: "relative humidity must be above zero",
                value: rh_percent,
            });
        }

        let gamma = self.gamma(temp_c, rh_percent);
        let dew_point = (self.b * gamma) / (self.a - gamma);

        if dew_point.is_finite() {
            Ok(dew_point)
        } else {
            Err(DewPointError::InvalidDomain {
                reason: "dew point is not finite",
                value: dew_point,
            })
        }
    }
}

impl Default for MagnusCoefficients {
    fn default() -> Self {
        Self::SONNTAG
    }
}

/// Dew point in °C using the default (Sonntag) coefficients
pub fn dew_point(temp_c: f32, rh_percent: f32) -> DewPointResult<f32> {
    MagnusCoefficients::default().dew_point(temp_c, rh_percent)
}

/// Round to a fixed number of decimals, half away from zero
///
/// `decimals` is capped at [`MAX_ACCURACY_DECIMALS`]; f32 carries no more than that.
pub fn round_to_decimals(value: f32, decimals: u8) -> f32 {
    let decimals = decimals.min(MAX_ACCURACY_DECIMALS);
    let scale = (0..decimals).fold(1.0f32, |scale, _| scale * 10.0);
    roundf(value * scale) / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point() {
        // 25 °C, 60 % RH is the textbook example: 16.7 °C
        let dp = dew_point(25.0, 60.0).unwrap();
        assert!((dp - 16.7).abs() < 0.1, "got {}", dp);
    }

    #[test]
    fn saturation_equals_temperature() {
        for temp in [-10.0f32, 0.0, 12.5, 30.0, 55.0] {
            let dp = dew_point(temp, 100.0).unwrap();
            assert!((dp - temp).abs() < 1e-3, "T={} dp={}", temp, dp);
        }
    }

    #[test]
    fn zero_humidity_rejected() {
        assert!(matches!(
            dew_point(20.0, 0.0),
            Err(DewPointError::InvalidDomain { .. })
        ));
        assert!(dew_point(20.0, -3.0).is_err());
        assert!(dew_point(20.0, f32::NAN).is_err());
    }

    #[test]
    fn non_finite_result_rejected() {
        // b + T == 0 divides by zero
        let result = MagnusCoefficients::SONNTAG.dew_point(-MAGNUS_B_C, 50.0);
        assert!(matches!(result, Err(DewPointError::InvalidDomain { .. })));

        assert!(dew_point(f32::INFINITY, 50.0).is_err());
    }

    #[test]
    fn tetens_close_to_sonntag() {
        let sonntag = MagnusCoefficients::SONNTAG.dew_point(20.0, 50.0).unwrap();
        let tetens = MagnusCoefficients::TETENS.dew_point(20.0, 50.0).unwrap();
        assert!((sonntag - 9.3).abs() < 0.2);
        assert!((sonntag - tetens).abs() < 0.2);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_decimals(16.6931, 1), 16.7);
        assert_eq!(round_to_decimals(-3.25, 0), -3.0);
        assert_eq!(round_to_decimals(9.26, 1), 9.3);
        assert_eq!(round_to_decimals(1.23456, 3), 1.235);
    }

    #[test]
    fn rounding_caps_decimals() {
        // 10^40 overflows f32
        assert_eq!(round_to_decimals(16.5, 40), 16.5);
        assert_eq!(round_to_decimals(-2.0, u8::MAX), -2.0);
        assert_eq!(
            round_to_decimals(0.1234567, 40),
            round_to_decimals(0.1234567, MAX_ACCURACY_DECIMALS)
        );
    }
}
