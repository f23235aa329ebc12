//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

use std::future::Future;

use sensorhub_domain::error::SensorHubError;
use sensorhub_domain::filter::ReadingFilter;
use sensorhub_domain::reading::Reading;

/// Durable, append-only store of readings.
///
/// The store owns all persisted rows; callers only ever see request-scoped
/// copies returned from [`Self::scan`]. A single insert and a single scan
/// must each be atomic — concurrent requests must never observe a partial
/// row. Scans return rows in store-native insertion order.
///
/// Futures are required to be `Send` so services can be driven from a
/// multi-threaded runtime.
pub trait ReadingStore {
    /// Persist one reading synchronously.
    fn insert(&self, reading: Reading) -> impl Future<Output = Result<(), SensorHubError>> + Send;

    /// Return every reading matching `filter`, in insertion order.
    ///
    /// User-supplied filter values are opaque data: implementations must
    /// bind them as query parameters, never splice them into query text.
    fn scan(
        &self,
        filter: ReadingFilter,
    ) -> impl Future<Output = Result<Vec<Reading>, SensorHubError>> + Send;
}
