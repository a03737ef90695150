//! Dew Point Estimator Component
//!
//! Derives a dew point sensor from a temperature sensor (°C) and a relative humidity
//! sensor (%), using the Magnus approximation from [`crate::magnus`].
//!
//! ## Update Cycle
//!
//! ```text
//! read T, RH ──► both Ready? ──no──► UpstreamUnavailable ─┐
//!                    │yes                                 │
//!                    ▼                                    ▼
//!               RH in domain? ──no──► InvalidDomain ──► output Ready? ──yes──► publish Unavailable
//!                    │yes                                 │no
//!                    ▼                                    ▼
//!               Magnus(T, RH) ──non-finite──► InvalidDomain   (nothing published)
//!                    │
//!                    ▼
//!        round to accuracy_decimals ──► publish Ready(value)
//! ```
//!
//! ## Output State Machine
//!
//! | From          | Update result | To            | Published            |
//! |---------------|---------------|---------------|----------------------|
//! | `Unavailable` | success       | `Ready(v)`    | `Ready(v)`           |
//! | `Ready(_)`    | success       | `Ready(v)`    | `Ready(v)`           |
//! | `Ready(_)`    | failure       | `Unavailable` | `Unavailable`        |
//! | `Unavailable` | failure       | `Unavailable` | nothing              |
//!
//! The last good value is never held past a failed cycle. Subscribers see the
//! unavailable marker once, on the transition.
//!
//! ## Scheduling
//!
//! - [`UpdateMode::OnChange`]: `setup` subscribes to both upstream sensors and every
//!   new upstream state triggers an update
//! - [`UpdateMode::Polling`]: the [`Scheduler`](crate::Scheduler) calls `update` on
//!   the configured interval and upstream publications are only read
//!
//! Both modes run one initial update at setup.

use core::cell::Cell;

use crate::{
    component::{setup_priority, Component},
    constants::physics::{PLAUSIBLE_TEMP_MAX_C, PLAUSIBLE_TEMP_MIN_C, SATURATION_HUMIDITY_PCT},
    errors::{DewPointError, DewPointResult, Input},
    magnus::{round_to_decimals, MagnusCoefficients},
    sensor::{Sensor, SensorInfo, SensorState, StateObserver},
};

/// When the estimator recomputes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// On every new upstream state
    OnChange,
    /// On a fixed interval driven by the scheduler
    Polling {
        /// Interval in milliseconds
        interval_ms: u64,
    },
}

impl Default for UpdateMode {
    fn default() -> Self {
        Self::OnChange
    }
}

/// Dew point derived from a temperature and a humidity sensor
pub struct DewPointEstimator<'a> {
    temperature: &'a Sensor<'a>,
    humidity: &'a Sensor<'a>,
    output: Sensor<'a>,
    coefficients: MagnusCoefficients,
    humidity_ceiling: Option<f32>,
    update_mode: UpdateMode,
    priority: f32,
    last_error: Cell<Option<DewPointError>>,
    subscribed: Cell<bool>,
}

impl<'a> DewPointEstimator<'a> {
    /// Wire an estimator to its two sources, with default output metadata
    pub fn new(temperature: &'a Sensor<'a>, humidity: &'a Sensor<'a>) -> Self {
        Self {
            temperature,
            humidity,
            output: Sensor::new(SensorInfo::default()),
            coefficients: MagnusCoefficients::default(),
            humidity_ceiling: None,
            update_mode: UpdateMode::default(),
            priority: setup_priority::DATA,
            last_error: Cell::new(None),
            subscribed: Cell::new(false),
        }
    }

    /// Replace the output sensor's metadata
    pub fn with_info(mut self, info: SensorInfo) -> Self {
        self.output = Sensor::new(info);
        self
    }

    /// Use another Magnus coefficient set
    pub fn with_coefficients(mut self, coefficients: MagnusCoefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Reject humidity above `ceiling` percent instead of computing with it
    pub fn with_humidity_ceiling(mut self, ceiling: f32) -> Self {
        self.humidity_ceiling = Some(ceiling);
        self
    }

    /// Reject supersaturated readings (RH above 100 %)
    pub fn strict(self) -> Self {
        self.with_humidity_ceiling(SATURATION_HUMIDITY_PCT)
    }

    /// Choose push-driven or polled updates
    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Override the setup priority
    pub fn with_setup_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    /// The published dew point, usable as a source for further components
    pub fn output(&self) -> &Sensor<'a> {
        &self.output
    }

    /// Current published state
    pub fn state(&self) -> SensorState {
        self.output.state()
    }

    /// Why the most recent update failed, `None` after a success
    pub fn last_error(&self) -> Option<DewPointError> {
        self.last_error.get()
    }

    /// Coefficients in use
    pub fn coefficients(&self) -> MagnusCoefficients {
        self.coefficients
    }

    /// Configured scheduling
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Compute the unrounded dew point from the current upstream states
    ///
    /// Pure: nothing is published.
    pub fn compute(&self) -> DewPointResult<f32> {
        let temp_c = self
            .temperature
            .state()
            .value()
            .ok_or(DewPointError::UpstreamUnavailable { input: Input::Temperature })?;
        let rh_percent = self
            .humidity
            .state()
            .value()
            .ok_or(DewPointError::UpstreamUnavailable { input: Input::Humidity })?;

        if let Some(ceiling) = self.humidity_ceiling {
            if rh_percent > ceiling {
                return Err(DewPointError::InvalidDomain {
                    reason: "relative humidity above ceiling",
                    value: rh_percent,
                });
            }
        }

        if !(PLAUSIBLE_TEMP_MIN_C..=PLAUSIBLE_TEMP_MAX_C).contains(&temp_c) {
            log_debug!("Temperature {} outside Magnus range, computing anyway", temp_c);
        }

        let dew_point = self.coefficients.dew_point(temp_c, rh_percent)?;
        log_debug!(
            "Calculated dew point: {} (T: {}, RH: {})",
            dew_point,
            temp_c,
            rh_percent
        );
        Ok(dew_point)
    }

    /// Recompute and publish
    ///
    /// On success the rounded value is published. On failure the output becomes
    /// `Unavailable`, which is published only if a value was being shown.
    pub fn update(&self) {
        match self.compute().and_then(|dew_point| self.round(dew_point)) {
            Ok(dew_point) => {
                self.last_error.set(None);
                self.output.publish_state(dew_point);
            }
            Err(error) => {
                log_debug!("Dew point unavailable: {}", error);
                self.last_error.set(Some(error));
                if self.output.has_state() {
                    self.output.invalidate();
                }
            }
        }
    }

    fn round(&self, dew_point: f32) -> DewPointResult<f32> {
        let rounded = round_to_decimals(dew_point, self.output.info().accuracy_decimals);
        if rounded.is_finite() {
            Ok(rounded)
        } else {
            Err(DewPointError::InvalidDomain {
                reason: "rounded dew point is not finite",
                value: dew_point,
            })
        }
    }
}

impl StateObserver for DewPointEstimator<'_> {
    fn on_state(&self, _state: SensorState) {
        self.update();
    }
}

impl<'a> Component<'a> for DewPointEstimator<'a> {
    /// Subscribes at most once; later calls only rerun the initial update
    fn setup(&'a self) -> DewPointResult<()> {
        if self.update_mode == UpdateMode::OnChange && !self.subscribed.get() {
            self.temperature.subscribe(self)?;
            self.humidity.subscribe(self)?;
            self.subscribed.set(true);
        }
        self.update();
        Ok(())
    }

    fn update(&self) {
        DewPointEstimator::update(self);
    }

    fn dump_config(&self) {
        log_info!("Dew Point Sensor:");
        log_info!("  Dew Point '{}' ({})", self.output.name(), self.output.info().unit.as_str());
        log_info!("  Temperature Source '{}'", self.temperature.name());
        log_info!("  Humidity Source '{}'", self.humidity.name());
        log_info!(
            "  Magnus coefficients: a={} b={}",
            self.coefficients.a,
            self.coefficients.b
        );
        if let UpdateMode::Polling { interval_ms } = self.update_mode {
            log_info!("  Update interval: {} ms", interval_ms);
        }
    }

    fn setup_priority(&self) -> f32 {
        self.priority
    }

    fn update_interval_ms(&self) -> Option<u64> {
        match self.update_mode {
            UpdateMode::OnChange => None,
            UpdateMode::Polling { interval_ms } => Some(interval_ms),
        }
    }
}
