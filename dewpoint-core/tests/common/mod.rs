//! Common test utilities for integration tests
//!
//! This module provides:
//! - A recording observer to assert on published states
//! - Paired temperature/humidity sources
//! - Realistic reading series for end-to-end scenarios

#![allow(dead_code)]

use std::cell::RefCell;

use dewpoint_core::{Sensor, SensorInfo, SensorState, StateObserver};

/// Records every state a sensor publishes
#[derive(Default)]
pub struct Recorder {
    seen: RefCell<Vec<SensorState>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first
    pub fn states(&self) -> Vec<SensorState> {
        self.seen.borrow().clone()
    }

    /// Published numeric values only
    pub fn values(&self) -> Vec<f32> {
        self.seen.borrow().iter().filter_map(|state| state.value()).collect()
    }

    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn last(&self) -> Option<SensorState> {
        self.seen.borrow().last().copied()
    }
}

impl StateObserver for Recorder {
    fn on_state(&self, state: SensorState) {
        self.seen.borrow_mut().push(state);
    }
}

/// Temperature and humidity sources with no reading yet
pub fn sources<'a>() -> (Sensor<'a>, Sensor<'a>) {
    (
        Sensor::new(SensorInfo::temperature("Outdoor Temperature")),
        Sensor::new(SensorInfo::humidity("Outdoor Humidity")),
    )
}

/// One night of readings: air cools from 18 °C to 8 °C while RH climbs to saturation
pub fn nightfall_series() -> Vec<(f32, f32)> {
    (0..=10)
        .map(|step| {
            let step = step as f32;
            (18.0 - step, 60.0 + step * 4.0)
        })
        .collect()
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
