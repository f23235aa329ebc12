//! `SQLite` implementation of [`ReadingStore`].

use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{FromRow, QueryBuilder, Row, SqlitePool};

use sensorhub_app::ports::ReadingStore;
use sensorhub_domain::error::SensorHubError;
use sensorhub_domain::filter::ReadingFilter;
use sensorhub_domain::reading::Reading;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Reading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let device_uuid: String = row.try_get("device_uuid")?;
        let type_str: String = row.try_get("type")?;
        let value: i64 = row.try_get("value")?;
        let date_created: i64 = row.try_get("date_created")?;

        let sensor_type = type_str
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Reading {
            device_uuid,
            sensor_type,
            value,
            date_created,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO readings (device_uuid, type, value, date_created)
    VALUES (?, ?, ?, ?)
";

/// `SQLite`-backed reading store.
///
/// Scans are assembled with [`QueryBuilder`]: filter fragments are fixed SQL
/// and every client-supplied value goes through `push_bind`. Rows come back
/// in rowid (insertion) order — no explicit `ORDER BY`.
pub struct SqliteReadingStore {
    pool: SqlitePool,
}

impl SqliteReadingStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReadingStore for SqliteReadingStore {
    async fn insert(&self, reading: Reading) -> Result<(), SensorHubError> {
        sqlx::query(INSERT)
            .bind(&reading.device_uuid)
            .bind(reading.sensor_type.as_str())
            .bind(reading.value)
            .bind(reading.date_created)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn scan(&self, filter: ReadingFilter) -> Result<Vec<Reading>, SensorHubError> {
        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT device_uuid, type, value, date_created FROM readings");

        let mut prefix = " WHERE ";
        if let Some(device_uuid) = &filter.device_uuid {
            builder.push(prefix).push("device_uuid = ");
            builder.push_bind(device_uuid.clone());
            prefix = " AND ";
        }
        if let Some(sensor_type) = filter.sensor_type {
            builder.push(prefix).push("type = ");
            builder.push_bind(sensor_type.as_str());
            prefix = " AND ";
        }
        if let Some(start) = filter.start {
            builder.push(prefix).push("date_created >= ");
            builder.push_bind(start);
            prefix = " AND ";
        }
        if let Some(end) = filter.end {
            builder.push(prefix).push("date_created <= ");
            builder.push_bind(end);
        }

        let rows: Vec<Wrapper> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use sensorhub_domain::reading::SensorType;

    async fn setup() -> SqliteReadingStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteReadingStore::new(db.pool().clone())
    }

    fn reading(device: &str, sensor_type: SensorType, value: i64, at: i64) -> Reading {
        Reading::new(device, sensor_type, value, at).unwrap()
    }

    #[tokio::test]
    async fn should_insert_and_scan_back_identical_rows() {
        let store = setup().await;
        let row = reading("dev", SensorType::Temperature, 22, 1000);
        store.insert(row.clone()).await.unwrap();

        let found = store
            .scan(ReadingFilter::open().with_device("dev"))
            .await
            .unwrap();
        assert_eq!(found, vec![row]);
    }

    #[tokio::test]
    async fn should_scan_in_insertion_order() {
        let store = setup().await;
        for (value, at) in [(50, 30), (22, 10), (100, 20)] {
            store
                .insert(reading("dev", SensorType::Temperature, value, at))
                .await
                .unwrap();
        }

        let found = store.scan(ReadingFilter::open()).await.unwrap();
        let values: Vec<i64> = found.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![50, 22, 100]);
    }

    #[tokio::test]
    async fn should_filter_by_sensor_type() {
        let store = setup().await;
        store
            .insert(reading("dev", SensorType::Temperature, 22, 10))
            .await
            .unwrap();
        store
            .insert(reading("dev", SensorType::Humidity, 55, 20))
            .await
            .unwrap();

        let found = store
            .scan(
                ReadingFilter::open()
                    .with_device("dev")
                    .with_sensor_type(Some(SensorType::Humidity)),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 55);
    }

    #[tokio::test]
    async fn should_apply_inclusive_time_range() {
        let store = setup().await;
        for (value, at) in [(4, 1_635_335_102), (22, 1_635_335_111), (55, 1_635_335_120)] {
            store
                .insert(reading("dev", SensorType::Temperature, value, at))
                .await
                .unwrap();
        }

        let found = store
            .scan(
                ReadingFilter::open()
                    .with_device("dev")
                    .with_range(Some(1_635_335_102), Some(1_635_335_111)),
            )
            .await
            .unwrap();
        let values: Vec<i64> = found.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![4, 22]);
    }

    #[tokio::test]
    async fn should_not_filter_on_absent_fields() {
        let store = setup().await;
        store
            .insert(reading("a", SensorType::Temperature, 1, 10))
            .await
            .unwrap();
        store
            .insert(reading("b", SensorType::Humidity, 2, 20))
            .await
            .unwrap();

        let found = store.scan(ReadingFilter::open()).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn should_treat_filter_values_as_data_not_sql() {
        let store = setup().await;
        store
            .insert(reading("dev", SensorType::Temperature, 1, 10))
            .await
            .unwrap();

        // A hostile device id must match nothing, not break the query.
        let found = store
            .scan(ReadingFilter::open().with_device("dev\" OR \"1\"=\"1"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
