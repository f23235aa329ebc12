//! JSON REST handlers for per-device readings and aggregates.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use sensorhub_app::ports::ReadingStore;
use sensorhub_app::services::reading_service::ReadingQuery;
use sensorhub_domain::error::{SensorHubError, ValidationError};
use sensorhub_domain::reading::Reading;
use sensorhub_domain::stats::Quartiles;

use crate::error::ApiError;
use crate::state::AppState;

/// Sentinel body for well-formed aggregate requests matching zero rows.
const NO_RECORDS: &str = "No records found";

/// Request body for ingesting a reading. Presence checks happen in the
/// service layer, so every field is optional here.
#[derive(Debug, Deserialize)]
pub struct IngestBody {
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
    pub value: Option<i64>,
    pub date_created: Option<i64>,
}

/// Query parameters shared by the read endpoints.
#[derive(Debug, Deserialize)]
pub struct ReadingsParams {
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl From<ReadingsParams> for ReadingQuery {
    fn from(params: ReadingsParams) -> Self {
        Self {
            sensor_type: params.sensor_type,
            start: params.start,
            end: params.end,
        }
    }
}

/// Wire shape of the median endpoint: interpolated value and timestamp,
/// echoing the requested device and sensor type.
#[derive(Serialize)]
pub struct MedianBody {
    pub date_created: f64,
    pub device_uuid: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub value: f64,
}

/// Wire shape of the mean and mode endpoints.
#[derive(Serialize)]
pub struct ValueBody<T> {
    pub value: T,
}

/// Possible responses from the ingest endpoint.
pub enum CreateResponse {
    Created,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created => (StatusCode::CREATED, "success").into_response(),
        }
    }
}

/// Possible responses from the list, min, and max endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Reading>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the median endpoint.
pub enum MedianResponse {
    Ok(Json<MedianBody>),
    NoRecords,
}

impl IntoResponse for MedianResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NoRecords => NO_RECORDS.into_response(),
        }
    }
}

/// Possible responses from the mean and mode endpoints.
pub enum ValueResponse<T> {
    Ok(Json<ValueBody<T>>),
    NoRecords,
}

impl<T: Serialize> IntoResponse for ValueResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NoRecords => NO_RECORDS.into_response(),
        }
    }
}

/// Possible responses from the quartiles endpoint.
pub enum QuartilesResponse {
    Ok(Json<Quartiles>),
    NoRecords,
}

impl IntoResponse for QuartilesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NoRecords => NO_RECORDS.into_response(),
        }
    }
}

/// `POST /devices/{device_uuid}/readings/`
///
/// The body is extracted fallibly so a malformed payload (bad JSON, a
/// non-integer `value`, a missing JSON content type) reports as a client
/// error rather than the extractor's default status.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    body: Result<Json<IngestBody>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let Json(body) = body.map_err(|_| {
        ApiError::from(SensorHubError::Validation(ValidationError::MalformedBody))
    })?;
    state
        .reading_service
        .ingest(
            &device_uuid,
            body.sensor_type.as_deref(),
            body.value,
            body.date_created,
        )
        .await?;
    Ok(CreateResponse::Created)
}

/// `GET /devices/{device_uuid}/readings/?type?&start?&end?`
pub async fn list<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<ListResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let readings = state
        .reading_service
        .list(&device_uuid, params.into())
        .await?;
    Ok(ListResponse::Ok(Json(readings)))
}

/// `GET /devices/{device_uuid}/readings/min/?type&start?&end?`
pub async fn min<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<ListResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let reading = state
        .reading_service
        .min(&device_uuid, params.into())
        .await?;
    Ok(ListResponse::Ok(Json(reading.into_iter().collect())))
}

/// `GET /devices/{device_uuid}/readings/max/?type&start?&end?`
pub async fn max<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<ListResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let reading = state
        .reading_service
        .max(&device_uuid, params.into())
        .await?;
    Ok(ListResponse::Ok(Json(reading.into_iter().collect())))
}

/// `GET /devices/{device_uuid}/readings/median/?type&start?&end?`
pub async fn median<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<MedianResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let sensor_type = params.sensor_type.clone().unwrap_or_default();
    let point = state
        .reading_service
        .median(&device_uuid, params.into())
        .await?;

    Ok(match point {
        Some(point) => MedianResponse::Ok(Json(MedianBody {
            date_created: point.date_created,
            device_uuid,
            sensor_type,
            value: point.value,
        })),
        None => MedianResponse::NoRecords,
    })
}

/// `GET /devices/{device_uuid}/readings/mean/?type&start?&end?`
pub async fn mean<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<ValueResponse<f64>, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let mean = state
        .reading_service
        .mean(&device_uuid, params.into())
        .await?;
    Ok(match mean {
        Some(value) => ValueResponse::Ok(Json(ValueBody { value })),
        None => ValueResponse::NoRecords,
    })
}

/// `GET /devices/{device_uuid}/readings/mode/?type&start?&end?`
pub async fn mode<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<ValueResponse<i64>, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let mode = state
        .reading_service
        .mode(&device_uuid, params.into())
        .await?;
    Ok(match mode {
        Some(value) => ValueResponse::Ok(Json(ValueBody { value })),
        None => ValueResponse::NoRecords,
    })
}

/// `GET /devices/{device_uuid}/readings/quartiles/?type&start&end`
pub async fn quartiles<S>(
    State(state): State<AppState<S>>,
    Path(device_uuid): Path<String>,
    Query(params): Query<ReadingsParams>,
) -> Result<QuartilesResponse, ApiError>
where
    S: ReadingStore + Send + Sync + 'static,
{
    let quartiles = state
        .reading_service
        .quartiles(&device_uuid, params.into())
        .await?;
    Ok(match quartiles {
        Some(quartiles) => QuartilesResponse::Ok(Json(quartiles)),
        None => QuartilesResponse::NoRecords,
    })
}
