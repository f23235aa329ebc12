//! Reading — one sensor observation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Epoch;

/// Inclusive bounds for a reading value.
pub const VALUE_MIN: i64 = 0;
/// Inclusive upper bound for a reading value.
pub const VALUE_MAX: i64 = 100;

/// Kind of sensor a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Temperature,
    Humidity,
}

impl SensorType {
    /// Canonical lowercase name, as used on the wire and in the store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            other => Err(ValidationError::InvalidSensorType(other.to_owned())),
        }
    }
}

/// One immutable sensor observation.
///
/// Created only through ingestion; never updated or deleted. The serde field
/// names match the wire shape (`type` for the sensor type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Opaque device identifier supplied by the client.
    pub device_uuid: String,
    /// Sensor kind.
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    /// Observed value, an integer in `[0, 100]`.
    pub value: i64,
    /// Observation time, epoch seconds.
    pub date_created: Epoch,
}

impl Reading {
    /// Build a reading, enforcing the value-range invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ValueOutOfRange`] when `value` falls
    /// outside `[0, 100]`.
    pub fn new(
        device_uuid: impl Into<String>,
        sensor_type: SensorType,
        value: i64,
        date_created: Epoch,
    ) -> Result<Self, ValidationError> {
        if !(VALUE_MIN..=VALUE_MAX).contains(&value) {
            return Err(ValidationError::ValueOutOfRange(value));
        }
        Ok(Self {
            device_uuid: device_uuid.into(),
            sensor_type,
            value,
            date_created,
        })
    }
}
