//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sensorhub_domain::error::SensorHubError;

/// Maps [`SensorHubError`] to an HTTP response with the appropriate status.
///
/// Validation failures become `400` with the validation message as a
/// plain-text body; storage faults become a generic `500` — the detail goes
/// to the log, never to the client.
pub struct ApiError(SensorHubError);

impl From<SensorHubError> for ApiError {
    fn from(err: SensorHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SensorHubError::Validation(err) => {
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            SensorHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
