//! Reading service — ingestion and statistics use-cases.
//!
//! Carries the per-endpoint validation layer: every precondition is checked
//! here, in declared order, before the store is touched. The first failing
//! check produces the rejection.

use sensorhub_domain::error::{SensorHubError, ValidationError};
use sensorhub_domain::filter::ReadingFilter;
use sensorhub_domain::reading::{Reading, SensorType};
use sensorhub_domain::stats::{self, DeviceSummary, MedianPoint, Quartiles};
use sensorhub_domain::time::{Epoch, now_epoch};

use crate::ports::ReadingStore;

/// Optional query constraints shared by the read endpoints.
///
/// The sensor type arrives as raw client text; it is parsed (and rejected)
/// here rather than in the HTTP layer so every transport gets the same rules.
#[derive(Debug, Clone, Default)]
pub struct ReadingQuery {
    pub sensor_type: Option<String>,
    pub start: Option<Epoch>,
    pub end: Option<Epoch>,
}

/// Application service for reading ingestion and aggregation.
pub struct ReadingService<S> {
    store: S,
}

impl<S: ReadingStore> ReadingService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Ingest one reading for `device_uuid`.
    ///
    /// `sensor_type` and `value` are required; `date_created` defaults to
    /// the current epoch time.
    ///
    /// # Errors
    ///
    /// Returns [`SensorHubError::Validation`] when the type is missing or
    /// unknown, or the value is missing or outside `[0, 100]`; storage
    /// errors are propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn ingest(
        &self,
        device_uuid: &str,
        sensor_type: Option<&str>,
        value: Option<i64>,
        date_created: Option<Epoch>,
    ) -> Result<Reading, SensorHubError> {
        let sensor_type = require_sensor_type(sensor_type)?;
        let value = value.ok_or(ValidationError::MissingValue)?;
        let date_created = date_created.unwrap_or_else(now_epoch);

        let reading = Reading::new(device_uuid, sensor_type, value, date_created)?;
        self.store.insert(reading.clone()).await?;
        Ok(reading)
    }

    /// List readings for one device, in store-native insertion order.
    ///
    /// All query constraints are optional.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown sensor type, or a storage
    /// error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Vec<Reading>, SensorHubError> {
        let filter = device_filter(device_uuid, &query, parse_sensor_type(&query)?);
        self.store.scan(filter).await
    }

    /// The reading with the minimal value, if any. `sensor_type` required.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sensor type is missing or
    /// unknown, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn min(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<Reading>, SensorHubError> {
        let rows = self.scan_typed(device_uuid, &query).await?;
        Ok(stats::min_reading(&rows).cloned())
    }

    /// The reading with the maximal value, if any. `sensor_type` required.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sensor type is missing or
    /// unknown, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn max(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<Reading>, SensorHubError> {
        let rows = self.scan_typed(device_uuid, &query).await?;
        Ok(stats::max_reading(&rows).cloned())
    }

    /// Arithmetic mean of the matching values. `sensor_type` required.
    /// `None` means no matching rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sensor type is missing or
    /// unknown, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn mean(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<f64>, SensorHubError> {
        let rows = self.scan_typed(device_uuid, &query).await?;
        Ok(stats::mean(&values(&rows)))
    }

    /// R-7 interpolated median over value and timestamp. `sensor_type`
    /// required. `None` means no matching rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sensor type is missing or
    /// unknown, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn median(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<MedianPoint>, SensorHubError> {
        let rows = self.scan_typed(device_uuid, &query).await?;
        Ok(stats::median_point(&rows))
    }

    /// Most frequent value. `sensor_type` required. `None` means no
    /// matching rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the sensor type is missing or
    /// unknown, or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn mode(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<i64>, SensorHubError> {
        let rows = self.scan_typed(device_uuid, &query).await?;
        Ok(stats::mode(&values(&rows)))
    }

    /// First and third quartile of the matching values. `sensor_type`,
    /// `start`, and `end` are all required. `None` means no matching rows.
    ///
    /// # Errors
    ///
    /// Returns a validation error when any of the three parameters is
    /// missing (checked in that order) or the type is unknown, or a storage
    /// error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn quartiles(
        &self,
        device_uuid: &str,
        query: ReadingQuery,
    ) -> Result<Option<Quartiles>, SensorHubError> {
        let sensor_type = require_sensor_type(query.sensor_type.as_deref())?;
        if query.start.is_none() {
            return Err(ValidationError::MissingTimeRange("start").into());
        }
        if query.end.is_none() {
            return Err(ValidationError::MissingTimeRange("end").into());
        }

        let filter = device_filter(device_uuid, &query, Some(sensor_type));
        let rows = self.store.scan(filter).await?;
        Ok(stats::quartiles(&values(&rows)))
    }

    /// Cross-device rollup: group by device, five statistics per group,
    /// ranked by reading count descending. All constraints optional.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown sensor type, or a storage
    /// error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn summary(
        &self,
        query: ReadingQuery,
    ) -> Result<Vec<DeviceSummary>, SensorHubError> {
        let filter = ReadingFilter::open()
            .with_sensor_type(parse_sensor_type(&query)?)
            .with_range(query.start, query.end);
        let rows = self.store.scan(filter).await?;
        Ok(stats::summarize(&rows))
    }

    /// Scan one device with a mandatory sensor type, the common shape of the
    /// single-device aggregate endpoints.
    async fn scan_typed(
        &self,
        device_uuid: &str,
        query: &ReadingQuery,
    ) -> Result<Vec<Reading>, SensorHubError> {
        let sensor_type = require_sensor_type(query.sensor_type.as_deref())?;
        let filter = device_filter(device_uuid, query, Some(sensor_type));
        self.store.scan(filter).await
    }
}

fn device_filter(
    device_uuid: &str,
    query: &ReadingQuery,
    sensor_type: Option<SensorType>,
) -> ReadingFilter {
    ReadingFilter::open()
        .with_device(device_uuid)
        .with_sensor_type(sensor_type)
        .with_range(query.start, query.end)
}

fn parse_sensor_type(query: &ReadingQuery) -> Result<Option<SensorType>, ValidationError> {
    query
        .sensor_type
        .as_deref()
        .map(str::parse)
        .transpose()
}

fn require_sensor_type(raw: Option<&str>) -> Result<SensorType, ValidationError> {
    raw.ok_or(ValidationError::MissingSensorType)?.parse()
}

fn values(rows: &[Reading]) -> Vec<i64> {
    rows.iter().map(|r| r.value).collect()
}
