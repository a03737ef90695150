//! Property tests for the Magnus dew point
//!
//! Physical invariants that must hold across the nominal operating range,
//! independent of any particular reading.

mod common;

use common::sources;
use dewpoint_core::{magnus, DewPointEstimator, MagnusCoefficients};
use proptest::prelude::*;

proptest! {
    #[test]
    fn never_above_air_temperature(temp in 0.0f32..=50.0, rh in 0.01f32..=100.0) {
        let dew_point = magnus::dew_point(temp, rh).unwrap();
        prop_assert!(dew_point <= temp + 1e-3, "T={} RH={} dp={}", temp, rh, dew_point);
    }

    #[test]
    fn saturation_matches_air_temperature(temp in -40.0f32..=60.0) {
        let dew_point = magnus::dew_point(temp, 100.0).unwrap();
        prop_assert!((dew_point - temp).abs() < 0.1, "T={} dp={}", temp, dew_point);
    }

    #[test]
    fn monotonic_in_humidity(temp in 0.0f32..=50.0, rh in 0.01f32..=99.0, step in 0.0f32..=1.0) {
        for coefficients in [MagnusCoefficients::SONNTAG, MagnusCoefficients::TETENS] {
            let lower = coefficients.dew_point(temp, rh).unwrap();
            let higher = coefficients.dew_point(temp, rh + step).unwrap();
            prop_assert!(higher >= lower - 1e-4, "RH {} -> {}: {} -> {}", rh, rh + step, lower, higher);
        }
    }

    #[test]
    fn non_positive_humidity_rejected(temp in -50.0f32..=60.0, rh in -100.0f32..=0.0) {
        prop_assert!(magnus::dew_point(temp, rh).is_err());
    }

    #[test]
    fn published_value_is_stable(temp in -20.0f32..=50.0, rh in 1.0f32..=100.0) {
        let (temperature, humidity) = sources();
        let estimator = DewPointEstimator::new(&temperature, &humidity);
        temperature.publish_state(temp);
        humidity.publish_state(rh);

        estimator.update();
        let first = estimator.state().value().unwrap();
        estimator.update();
        let second = estimator.state().value().unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());

        // One decimal: value * 10 is an integer
        let scaled = first * 10.0;
        prop_assert!((scaled - scaled.round()).abs() < 1e-3);
    }
}
