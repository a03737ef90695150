//! Sensor Registry and Estimator Wiring
//!
//! The registry maps configuration ids to sensors that already exist. It is used
//! once, at boot: [`SensorRegistry::build`] resolves a [`DewPointConfig`]'s source
//! ids to references and hands back an estimator that holds those references
//! directly.

use std::collections::HashMap;

use log::{debug, warn};

use dewpoint_core::{DeviceClass, DewPointEstimator, Sensor};

use crate::{config::DewPointConfig, is_valid_id, ConfigError};

/// Id → sensor lookup used while wiring
pub struct SensorRegistry<'a> {
    sensors: HashMap<String, &'a Sensor<'a>>,
}

impl<'a> SensorRegistry<'a> {
    /// Create new empty registry
    pub fn new() -> Self {
        Self {
            sensors: HashMap::new(),
        }
    }

    /// Register a sensor under an id
    pub fn register(&mut self, id: &str, sensor: &'a Sensor<'a>) -> Result<(), ConfigError> {
        if !is_valid_id(id) {
            return Err(ConfigError::Invalid {
                field: "id",
                reason: format!("'{}' is not a valid id", id),
            });
        }
        if self.sensors.contains_key(id) {
            return Err(ConfigError::DuplicateId(id.to_string()));
        }
        self.sensors.insert(id.to_string(), sensor);
        Ok(())
    }

    /// Get sensor by id
    pub fn get(&self, id: &str) -> Option<&'a Sensor<'a>> {
        self.sensors.get(id).copied()
    }

    /// Number of registered sensors
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    fn resolve(
        &self,
        id: &str,
        expected: DeviceClass,
    ) -> Result<&'a Sensor<'a>, ConfigError> {
        let sensor = self
            .get(id)
            .ok_or_else(|| ConfigError::UnknownSensor(id.to_string()))?;

        // Only a hint: any sensor can be wired, as long as it reports the right unit
        if sensor.info().device_class != expected {
            warn!(
                "Sensor '{}' is {:?}, expected {:?} for a dew point source",
                id,
                sensor.info().device_class,
                expected
            );
        }
        Ok(sensor)
    }

    /// Validate `config` and construct its estimator
    ///
    /// The estimator still needs `setup()` (directly or through a scheduler) to
    /// subscribe to its sources.
    pub fn build(&self, config: &DewPointConfig) -> Result<DewPointEstimator<'a>, ConfigError> {
        config.validate()?;

        let temperature = self.resolve(&config.temperature, DeviceClass::Temperature)?;
        let humidity = self.resolve(&config.humidity, DeviceClass::Humidity)?;

        let mut estimator = DewPointEstimator::new(temperature, humidity)
            .with_info(config.sensor_info())
            .with_coefficients(config.coefficients.coefficients())
            .with_update_mode(config.update_mode())
            .with_setup_priority(config.priority());
        if config.strict {
            estimator = estimator.strict();
        }

        debug!(
            "Wired dew point '{}' to temperature '{}' and humidity '{}'",
            config.id, config.temperature, config.humidity
        );
        Ok(estimator)
    }
}

impl Default for SensorRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
