//! Configuration Schema and Wiring for the Dew Point Sensor
//!
//! ## Overview
//!
//! Firmware images are described declaratively: a list of sensors, each with an id,
//! and derived sensors that reference others by id. This crate is the dew point's part
//! of that description. It
//!
//! 1. **Declares** the configuration surface ([`DewPointConfig`]): two required source
//!    ids plus the usual sensor metadata, defaulting to a temperature-class
//!    measurement in °C with one decimal
//! 2. **Validates** it ([`DewPointConfig::validate`]) before anything is built
//! 3. **Wires** it ([`SensorRegistry::build`]): ids are resolved once against the
//!    sensors that already exist and the estimator is constructed with direct
//!    references. No name lookup happens after boot.
//!
//! ## Configuration Format
//!
//! ```json
//! {
//!   "id": "outdoor_dew_point",
//!   "name": "Outdoor Dew Point",
//!   "temperature": "outdoor_temperature",
//!   "humidity": "outdoor_humidity",
//!   "accuracy_decimals": 1,
//!   "update_interval": 60000,
//!   "coefficients": "sonntag",
//!   "strict": false
//! }
//! ```
//!
//! | Field                 | Required | Default        | Notes                              |
//! |-----------------------|----------|----------------|------------------------------------|
//! | `id`                  | yes      |                | `[A-Za-z_][A-Za-z0-9_]*`           |
//! | `temperature`         | yes      |                | id of a temperature sensor (°C)    |
//! | `humidity`            | yes      |                | id of a humidity sensor (%)        |
//! | `name`                | no       | `Dew Point`    |                                    |
//! | `unit_of_measurement` | no       | `°C`           |                                    |
//! | `accuracy_decimals`   | no       | `1`            | at most 6                          |
//! | `device_class`        | no       | `temperature`  |                                    |
//! | `state_class`         | no       | `measurement`  |                                    |
//! | `update_interval`     | no       | push-driven    | milliseconds, enables polling      |
//! | `coefficients`        | no       | `sonntag`      | `sonntag` or `tetens`              |
//! | `strict`              | no       | `false`        | reject RH above 100 %              |
//! | `setup_priority`      | no       | `600.0`        |                                    |
//!
//! Unknown fields are rejected so typos fail loudly instead of silently falling back
//! to defaults.
//!
//! ## Usage Example
//!
//! ```rust
//! use dewpoint_core::{Component, Sensor, SensorInfo};
//! use dewpoint_schemas::{DewPointConfig, SensorRegistry};
//!
//! let temperature = Sensor::new(SensorInfo::temperature("Outdoor Temperature"));
//! let humidity = Sensor::new(SensorInfo::humidity("Outdoor Humidity"));
//!
//! let mut registry = SensorRegistry::new();
//! registry.register("outdoor_temperature", &temperature)?;
//! registry.register("outdoor_humidity", &humidity)?;
//!
//! let config = DewPointConfig::from_json_str(r#"{
//!     "id": "outdoor_dew_point",
//!     "temperature": "outdoor_temperature",
//!     "humidity": "outdoor_humidity"
//! }"#)?;
//!
//! let dew_point = registry.build(&config)?;
//! dew_point.setup()?;
//!
//! temperature.publish_state(25.0);
//! humidity.publish_state(60.0);
//! assert_eq!(dew_point.state().value(), Some(16.7));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use dewpoint_core::DewPointError;

pub mod config;
pub mod registry;

pub use config::{CoefficientSet, DewPointConfig};
pub use registry::SensorRegistry;

/// Configuration errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Invalid '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("Unknown sensor id: {0}")]
    UnknownSensor(String),

    #[error("Duplicate sensor id: {0}")]
    DuplicateId(String),

    #[error("Wiring failed: {0}")]
    Wiring(DewPointError),
}

impl From<DewPointError> for ConfigError {
    fn from(error: DewPointError) -> Self {
        ConfigError::Wiring(error)
    }
}

/// True for `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
