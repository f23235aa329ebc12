//! Common error types used across the workspace.
//!
//! Two-level taxonomy: a request either fails a precondition
//! ([`ValidationError`], reported to the client) or hits an infrastructure
//! fault ([`SensorHubError::Storage`], reported generically). Aggregates over
//! zero rows are not errors at all — they surface as `None` from the
//! aggregation engine.

/// Top-level error for the sensorhub workspace.
#[derive(Debug, thiserror::Error)]
pub enum SensorHubError {
    /// A request precondition failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The reading store or another collaborator failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Precondition failures detected before any store access.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The `type` parameter is required for this endpoint.
    #[error("missing required parameter: type")]
    MissingSensorType,

    /// The supplied sensor type is not `temperature` or `humidity`.
    #[error("invalid sensor type: {0}")]
    InvalidSensorType(String),

    /// The `value` field is required when ingesting a reading.
    #[error("missing required field: value")]
    MissingValue,

    /// Reading values must lie in `[0, 100]`.
    #[error("value out of range: {0}")]
    ValueOutOfRange(i64),

    /// A time-range parameter is required for this endpoint.
    #[error("missing required parameter: {0}")]
    MissingTimeRange(&'static str),

    /// The request body could not be read as the expected shape
    /// (malformed JSON, wrong field types, wrong content type).
    #[error("malformed request body")]
    MalformedBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_offending_value_in_message() {
        let err = ValidationError::ValueOutOfRange(101);
        assert_eq!(err.to_string(), "value out of range: 101");
    }

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: SensorHubError = ValidationError::MissingSensorType.into();
        assert!(matches!(err, SensorHubError::Validation(_)));
    }
}
