//! Sensor Metadata Defaults and Capacities
//!
//! Defaults mirror how a dew point reading is declared to the rest of the firmware:
//! a temperature-class measurement in degrees Celsius with one decimal.

// ===== OUTPUT METADATA =====

/// Default display name of the dew point output.
pub const DEW_POINT_NAME: &str = "Dew Point";

/// Unit of the dew point output and of temperature sources.
pub const UNIT_CELSIUS: &str = "°C";

/// Unit of relative humidity sources.
pub const UNIT_PERCENT: &str = "%";

/// Decimals published for the dew point.
///
/// Matches the ±0.35 °C accuracy of the Magnus approximation.
pub const DEW_POINT_ACCURACY_DECIMALS: u8 = 1;

/// Upper bound for `accuracy_decimals`.
///
/// f32 carries about 7 significant digits; more decimals only publish noise.
pub const MAX_ACCURACY_DECIMALS: u8 = 6;

// ===== CAPACITIES =====

/// Subscription slots per sensor.
///
/// Fan-out is small on embedded deployments: one or two derived components plus
/// a transport.
pub const MAX_OBSERVERS: usize = 4;

/// Bytes reserved for a sensor name.
pub const SENSOR_NAME_CAPACITY: usize = 32;

/// Bytes reserved for a unit of measurement.
pub const SENSOR_UNIT_CAPACITY: usize = 8;
