//! JSON REST handler for the cross-device summary.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use sensorhub_app::ports::ReadingStore;
use sensorhub_domain::stats::DeviceSummary;

use crate::api::readings::ReadingsParams;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the summary endpoint.
pub enum ListResponse {
    Ok(Json<Vec<DeviceSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /devices/summary/?type?&start?&end?`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<ReadingsParams>,
) -> Result<ListResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let summaries = state.reading_service.summary(params.into()).await?;
    Ok(ListResponse::Ok(Json(summaries)))
}
