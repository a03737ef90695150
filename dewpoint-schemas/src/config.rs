//! Dew point configuration surface
//!
//! Deserialised with serde, then checked by [`DewPointConfig::validate`]. Parsing only
//! enforces shape (required fields, types, no unknown fields); validation enforces
//! the rules serde cannot express.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dewpoint_core::{
    constants::sensors::{
        DEW_POINT_ACCURACY_DECIMALS, DEW_POINT_NAME, MAX_ACCURACY_DECIMALS, SENSOR_NAME_CAPACITY,
        SENSOR_UNIT_CAPACITY, UNIT_CELSIUS,
    },
    setup_priority, DeviceClass, MagnusCoefficients, SensorInfo, StateClass, UpdateMode,
};

use crate::{is_valid_id, ConfigError};

/// Named Magnus coefficient sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSet {
    /// a = 17.62, b = 243.12 °C
    #[default]
    Sonntag,
    /// a = 17.27, b = 237.7 °C
    Tetens,
}

impl CoefficientSet {
    pub fn coefficients(&self) -> MagnusCoefficients {
        match self {
            CoefficientSet::Sonntag => MagnusCoefficients::SONNTAG,
            CoefficientSet::Tetens => MagnusCoefficients::TETENS,
        }
    }
}

/// One dew point sensor declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DewPointConfig {
    /// Id of this sensor
    pub id: String,

    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Id of the temperature source
    pub temperature: String,

    /// Id of the humidity source
    pub humidity: String,

    #[serde(default = "default_unit")]
    pub unit_of_measurement: String,

    #[serde(default = "default_accuracy_decimals")]
    pub accuracy_decimals: u8,

    #[serde(default = "default_device_class")]
    pub device_class: DeviceClass,

    #[serde(default = "default_state_class")]
    pub state_class: StateClass,

    /// Polling interval in milliseconds; absent means push-driven
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval: Option<u64>,

    #[serde(default)]
    pub coefficients: CoefficientSet,

    /// Reject supersaturated humidity readings
    #[serde(default)]
    pub strict: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_priority: Option<f32>,
}

fn default_name() -> String {
    DEW_POINT_NAME.to_string()
}

fn default_unit() -> String {
    UNIT_CELSIUS.to_string()
}

fn default_accuracy_decimals() -> u8 {
    DEW_POINT_ACCURACY_DECIMALS
}

fn default_device_class() -> DeviceClass {
    DeviceClass::Temperature
}

fn default_state_class() -> StateClass {
    StateClass::Measurement
}

impl DewPointConfig {
    /// Minimal configuration with every optional field at its default
    pub fn new(id: &str, temperature: &str, humidity: &str) -> Self {
        Self {
            id: id.to_string(),
            name: default_name(),
            temperature: temperature.to_string(),
            humidity: humidity.to_string(),
            unit_of_measurement: default_unit(),
            accuracy_decimals: default_accuracy_decimals(),
            device_class: default_device_class(),
            state_class: default_state_class(),
            update_interval: None,
            coefficients: CoefficientSet::default(),
            strict: false,
            setup_priority: None,
        }
    }

    /// Parse and validate one declaration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON array of declarations
    pub fn list_from_json_str(json: &str) -> Result<Vec<Self>, ConfigError> {
        let configs: Vec<Self> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut seen: Vec<&str> = Vec::with_capacity(configs.len());
        for config in &configs {
            config.validate()?;
            if seen.contains(&config.id.as_str()) {
                return Err(ConfigError::DuplicateId(config.id.clone()));
            }
            seen.push(&config.id);
        }
        Ok(configs)
    }

    /// Read, parse and validate a file holding one declaration
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Serialise back to JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check the rules serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, id) in [
            ("id", &self.id),
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
        ] {
            if !is_valid_id(id) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("'{}' is not a valid id", id),
                });
            }
        }

        if self.temperature == self.id || self.humidity == self.id {
            return Err(ConfigError::Invalid {
                field: "id",
                reason: "a dew point sensor cannot be its own source".to_string(),
            });
        }

        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.name.len() > SENSOR_NAME_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "name",
                reason: format!("longer than {} bytes", SENSOR_NAME_CAPACITY),
            });
        }

        if self.unit_of_measurement.is_empty() || self.unit_of_measurement.len() > SENSOR_UNIT_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "unit_of_measurement",
                reason: format!("must be 1 to {} bytes", SENSOR_UNIT_CAPACITY),
            });
        }

        if self.accuracy_decimals > MAX_ACCURACY_DECIMALS {
            return Err(ConfigError::Invalid {
                field: "accuracy_decimals",
                reason: format!("at most {}", MAX_ACCURACY_DECIMALS),
            });
        }

        if self.update_interval == Some(0) {
            return Err(ConfigError::Invalid {
                field: "update_interval",
                reason: "must be positive".to_string(),
            });
        }

        if let Some(priority) = self.setup_priority {
            if !priority.is_finite() {
                return Err(ConfigError::Invalid {
                    field: "setup_priority",
                    reason: "must be a finite number".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Output sensor metadata
    pub fn sensor_info(&self) -> SensorInfo {
        SensorInfo::new(
            &self.name,
            &self.unit_of_measurement,
            self.accuracy_decimals,
            self.device_class,
            self.state_class,
        )
    }

    /// Push-driven unless an interval is set
    pub fn update_mode(&self) -> UpdateMode {
        match self.update_interval {
            Some(interval_ms) => UpdateMode::Polling { interval_ms },
            None => UpdateMode::OnChange,
        }
    }

    pub fn priority(&self) -> f32 {
        self.setup_priority.unwrap_or(setup_priority::DATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = DewPointConfig::from_json_str(
            r#"{"id": "dp", "temperature": "temp", "humidity": "hum"}"#,
        )
        .unwrap();

        assert_eq!(config, DewPointConfig::new("dp", "temp", "hum"));
        assert_eq!(config.name, "Dew Point");
        assert_eq!(config.unit_of_measurement, "°C");
        assert_eq!(config.accuracy_decimals, 1);
        assert_eq!(config.device_class, DeviceClass::Temperature);
        assert_eq!(config.state_class, StateClass::Measurement);
        assert_eq!(config.update_mode(), UpdateMode::OnChange);
        assert_eq!(config.coefficients, CoefficientSet::Sonntag);
        assert_eq!(config.priority(), setup_priority::DATA);
    }

    #[test]
    fn missing_source_is_parse_error() {
        let result = DewPointConfig::from_json_str(r#"{"id": "dp", "temperature": "temp"}"#);
        match result {
            Err(ConfigError::Parse(message)) => assert!(message.contains("humidity")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_field_rejected() {
        let result = DewPointConfig::from_json_str(
            r#"{"id": "dp", "temperature": "t", "humidity": "h", "pressure": "p"}"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn full_config() {
        let config = DewPointConfig::from_json_str(
            r#"{
                "id": "greenhouse_dew_point",
                "name": "Greenhouse Dew Point",
                "temperature": "greenhouse_temperature",
                "humidity": "greenhouse_humidity",
                "accuracy_decimals": 2,
                "update_interval": 30000,
                "coefficients": "tetens",
                "strict": true,
                "setup_priority": 400.0
            }"#,
        )
        .unwrap();

        assert_eq!(config.update_mode(), UpdateMode::Polling { interval_ms: 30_000 });
        assert_eq!(config.coefficients.coefficients(), MagnusCoefficients::TETENS);
        assert!(config.strict);
        assert_eq!(config.priority(), 400.0);

        let info = config.sensor_info();
        assert_eq!(info.name.as_str(), "Greenhouse Dew Point");
        assert_eq!(info.accuracy_decimals, 2);
    }

    #[test]
    fn invalid_values() {
        let mut config = DewPointConfig::new("dp", "temp", "hum");
        config.accuracy_decimals = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "accuracy_decimals", .. })
        ));

        let mut config = DewPointConfig::new("dp", "temp", "hum");
        config.update_interval = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "update_interval", .. })
        ));

        let config = DewPointConfig::new("dp", "outdoor-temp", "hum");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "temperature", .. })
        ));

        let config = DewPointConfig::new("dp", "dp", "hum");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "id", .. })));

        let mut config = DewPointConfig::new("dp", "temp", "hum");
        config.name = "   ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "name", .. })));
    }

    #[test]
    fn list_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "dp", "temperature": "t1", "humidity": "h1"},
            {"id": "dp", "temperature": "t2", "humidity": "h2"}
        ]"#;
        assert!(matches!(
            DewPointConfig::list_from_json_str(json),
            Err(ConfigError::DuplicateId(id)) if id == "dp"
        ));
    }

    #[test]
    fn json_round_trip_keeps_defaults_explicit() {
        let config = DewPointConfig::new("dp", "temp", "hum");
        let json = config.to_json_string().unwrap();
        assert!(json.contains(r#""device_class":"temperature""#));
        assert!(!json.contains("update_interval"));
        assert_eq!(DewPointConfig::from_json_str(&json).unwrap(), config);
    }
}
