//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod readings;
#[allow(clippy::missing_errors_doc)]
pub mod summary;

use axum::Router;
use axum::routing::get;

use sensorhub_app::ports::ReadingStore;

use crate::state::AppState;

/// Build the readings API router.
///
/// `/devices/summary/` is registered alongside the per-device routes; the
/// paths differ at the second segment, so there is no ambiguity.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: ReadingStore + Send + Sync + 'static,
{
    Router::new()
        .route("/devices/summary/", get(summary::list::<S>))
        .route(
            "/devices/{device_uuid}/readings/",
            get(readings::list::<S>).post(readings::create::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/min/",
            get(readings::min::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/max/",
            get(readings::max::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/median/",
            get(readings::median::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/mean/",
            get(readings::mean::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/mode/",
            get(readings::mode::<S>),
        )
        .route(
            "/devices/{device_uuid}/readings/quartiles/",
            get(readings::quartiles::<S>),
        )
}
