//! Shared application state for axum handlers.

use std::sync::Arc;

use sensorhub_app::ports::ReadingStore;
use sensorhub_app::services::ReadingService;

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the store itself does not need to be `Clone` —
/// only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Reading ingestion and statistics service.
    pub reading_service: Arc<ReadingService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            reading_service: Arc::clone(&self.reading_service),
        }
    }
}

impl<S: ReadingStore + Send + Sync + 'static> AppState<S> {
    /// Create a new application state from the service instance.
    pub fn new(reading_service: ReadingService<S>) -> Self {
        Self {
            reading_service: Arc::new(reading_service),
        }
    }
}
