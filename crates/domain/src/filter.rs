//! Filter — optional constraints narrowing a reading scan.

use crate::reading::{Reading, SensorType};
use crate::time::Epoch;

/// Conjunctive scan constraints. Absent fields impose no constraint.
///
/// A filter is constructed per request and discarded after the scan. The
/// store translates it into a parameterized WHERE clause; [`Self::matches`]
/// is the same predicate in pure form, used by in-memory stores and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingFilter {
    pub device_uuid: Option<String>,
    pub sensor_type: Option<SensorType>,
    /// Inclusive lower bound on `date_created`.
    pub start: Option<Epoch>,
    /// Inclusive upper bound on `date_created`.
    pub end: Option<Epoch>,
}

impl ReadingFilter {
    /// A filter with no constraints (matches every reading).
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Constrain to a single device.
    #[must_use]
    pub fn with_device(mut self, device_uuid: impl Into<String>) -> Self {
        self.device_uuid = Some(device_uuid.into());
        self
    }

    /// Constrain to a sensor type, when one is supplied.
    #[must_use]
    pub fn with_sensor_type(mut self, sensor_type: Option<SensorType>) -> Self {
        self.sensor_type = sensor_type;
        self
    }

    /// Constrain to an inclusive time range; either bound may be absent.
    #[must_use]
    pub fn with_range(mut self, start: Option<Epoch>, end: Option<Epoch>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// True iff `reading` satisfies every present constraint.
    #[must_use]
    pub fn matches(&self, reading: &Reading) -> bool {
        self.device_uuid
            .as_deref()
            .is_none_or(|device_uuid| reading.device_uuid == device_uuid)
            && self
                .sensor_type
                .is_none_or(|sensor_type| reading.sensor_type == sensor_type)
            && self.start.is_none_or(|start| reading.date_created >= start)
            && self.end.is_none_or(|end| reading.date_created <= end)
    }
}
