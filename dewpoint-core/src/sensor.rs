//! Published Sensor State with Observer Fan-Out
//!
//! ## Overview
//!
//! A [`Sensor`] is the unit of composition: it holds the current reading (or the fact
//! that there is none) and notifies a small, fixed set of observers every time a new
//! state is published. Hardware drivers publish into their sensor; derived components
//! such as the dew point estimator subscribe to upstream sensors and publish into their
//! own output sensor, so derived readings can feed further derived readings.
//!
//! ```text
//! temperature ──┐
//!               ├──► DewPointEstimator ──► dew point output ──► observers
//! humidity ─────┘
//! ```
//!
//! ## Memory Model
//!
//! - No heap: observers live in a fixed array of `MAX_OBSERVERS` slots
//! - Observers are borrowed (`&'a dyn StateObserver`), so a sensor and the
//!   components watching it share one lifetime, typically the firmware's `main`
//! - State lives in `Cell`s: publishing takes `&self`, which lets an observer read
//!   the sensor it is being notified by
//!
//! `Cell` makes `Sensor` `!Sync`. Sensors belong to one cooperative scheduler thread.
//!
//! ## Unavailable Readings
//!
//! Drivers conventionally report "no reading" as NaN. [`Sensor::publish_state`]
//! normalises NaN to [`SensorState::Unavailable`], so observers never see NaN.
//!
//! ```rust
//! use dewpoint_core::{Sensor, SensorInfo, SensorState};
//!
//! let humidity = Sensor::new(SensorInfo::humidity("Outdoor Humidity"));
//! assert_eq!(humidity.state(), SensorState::Unavailable);
//!
//! humidity.publish_state(55.0);
//! assert_eq!(humidity.state().value(), Some(55.0));
//!
//! humidity.publish_state(f32::NAN);
//! assert!(!humidity.has_state());
//! ```

use core::cell::Cell;
use core::fmt;

use heapless::String;

use crate::{
    constants::sensors::{
        DEW_POINT_ACCURACY_DECIMALS, DEW_POINT_NAME, MAX_OBSERVERS, SENSOR_NAME_CAPACITY,
        SENSOR_UNIT_CAPACITY, UNIT_CELSIUS, UNIT_PERCENT,
    },
    errors::{DewPointError, DewPointResult},
};

/// Bounded sensor name
pub type SensorName = String<SENSOR_NAME_CAPACITY>;

/// Bounded unit of measurement
pub type SensorUnit = String<SENSOR_UNIT_CAPACITY>;

/// Current reading of a sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorState {
    /// Not reported yet, or the last update failed
    Unavailable,
    /// Last published value
    Ready(f32),
}

impl SensorState {
    /// Map a raw driver value to a state, NaN meaning unavailable
    pub fn from_raw(value: f32) -> Self {
        if value.is_nan() {
            Self::Unavailable
        } else {
            Self::Ready(value)
        }
    }

    /// The value, if any
    pub fn value(&self) -> Option<f32> {
        match self {
            Self::Ready(value) => Some(*value),
            Self::Unavailable => None,
        }
    }

    /// True when a value is present
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl Default for SensorState {
    fn default() -> Self {
        Self::Unavailable
    }
}

/// What kind of quantity a sensor measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeviceClass {
    /// Temperature, including derived temperatures like the dew point
    Temperature,
    /// Relative humidity
    Humidity,
    /// Unclassified
    None,
}

/// How successive readings relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StateClass {
    /// Instantaneous measurement
    Measurement,
    /// Unclassified
    None,
}

/// Static description of a sensor
#[derive(Debug, Clone, PartialEq)]
pub struct SensorInfo {
    /// Display name, truncated to `SENSOR_NAME_CAPACITY` bytes
    pub name: SensorName,
    /// Unit of measurement
    pub unit: SensorUnit,
    /// Decimals published
    pub accuracy_decimals: u8,
    /// Kind of quantity
    pub device_class: DeviceClass,
    /// Relation between readings
    pub state_class: StateClass,
}

impl SensorInfo {
    /// Describe a sensor; strings longer than their capacity are truncated
    pub fn new(
        name: &str,
        unit: &str,
        accuracy_decimals: u8,
        device_class: DeviceClass,
        state_class: StateClass,
    ) -> Self {
        Self {
            name: bounded(name),
            unit: bounded(unit),
            accuracy_decimals,
            device_class,
            state_class,
        }
    }

    /// Air temperature in °C
    pub fn temperature(name: &str) -> Self {
        Self::new(name, UNIT_CELSIUS, 1, DeviceClass::Temperature, StateClass::Measurement)
    }

    /// Relative humidity in %
    pub fn humidity(name: &str) -> Self {
        Self::new(name, UNIT_PERCENT, 1, DeviceClass::Humidity, StateClass::Measurement)
    }

    /// Dew point output in °C with one decimal
    pub fn dew_point(name: &str) -> Self {
        Self::new(
            name,
            UNIT_CELSIUS,
            DEW_POINT_ACCURACY_DECIMALS,
            DeviceClass::Temperature,
            StateClass::Measurement,
        )
    }
}

impl Default for SensorInfo {
    fn default() -> Self {
        Self::dew_point(DEW_POINT_NAME)
    }
}

fn bounded<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Receives every state published by a sensor
pub trait StateObserver {
    /// Called synchronously from [`Sensor::publish_state`] and [`Sensor::invalidate`]
    fn on_state(&self, state: SensorState);
}

/// A published reading plus the observers watching it
pub struct Sensor<'a> {
    info: SensorInfo,
    state: Cell<SensorState>,
    observers: Cell<[Option<&'a dyn StateObserver>; MAX_OBSERVERS]>,
}

impl<'a> Sensor<'a> {
    /// Create a sensor with no reading
    pub fn new(info: SensorInfo) -> Self {
        Self {
            info,
            state: Cell::new(SensorState::Unavailable),
            observers: Cell::new([None; MAX_OBSERVERS]),
        }
    }

    /// Static description
    pub fn info(&self) -> &SensorInfo {
        &self.info
    }

    /// Display name
    pub fn name(&self) -> &str {
        self.info.name.as_str()
    }

    /// Current reading
    pub fn state(&self) -> SensorState {
        self.state.get()
    }

    /// True when a value is present
    pub fn has_state(&self) -> bool {
        self.state().is_ready()
    }

    /// Publish a raw value; NaN publishes `Unavailable`
    pub fn publish_state(&self, value: f32) {
        self.set_state(SensorState::from_raw(value));
    }

    /// Publish the unavailable marker
    pub fn invalidate(&self) {
        self.set_state(SensorState::Unavailable);
    }

    /// Register an observer for every future state
    pub fn subscribe(&self, observer: &'a dyn StateObserver) -> DewPointResult<()> {
        let mut observers = self.observers.get();
        match observers.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(observer);
                self.observers.set(observers);
                Ok(())
            }
            None => Err(DewPointError::ObserverLimit { capacity: MAX_OBSERVERS }),
        }
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.get().iter().filter(|slot| slot.is_some()).count()
    }

    fn set_state(&self, state: SensorState) {
        self.state.set(state);
        // Snapshot: an observer may subscribe others while being notified
        for observer in self.observers.get().iter().flatten() {
            observer.on_state(state);
        }
    }
}

impl fmt::Debug for Sensor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("info", &self.info)
            .field("state", &self.state.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}
