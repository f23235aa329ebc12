//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sensorhub_app::ports::ReadingStore;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: ReadingStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sensorhub_app::services::ReadingService;
    use sensorhub_domain::error::SensorHubError;
    use sensorhub_domain::filter::ReadingFilter;
    use sensorhub_domain::reading::{Reading, SensorType};
    use tower::ServiceExt;

    /// Stub store with a fixed row set; scans apply the filter in memory.
    struct StubStore {
        rows: Vec<Reading>,
    }

    impl ReadingStore for StubStore {
        async fn insert(&self, _reading: Reading) -> Result<(), SensorHubError> {
            Ok(())
        }

        async fn scan(&self, filter: ReadingFilter) -> Result<Vec<Reading>, SensorHubError> {
            Ok(self
                .rows
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect())
        }
    }

    /// Store whose every operation fails, for fault-mapping tests.
    struct FailingStore;

    impl ReadingStore for FailingStore {
        async fn insert(&self, _reading: Reading) -> Result<(), SensorHubError> {
            Err(SensorHubError::Storage("store offline".into()))
        }

        async fn scan(&self, _filter: ReadingFilter) -> Result<Vec<Reading>, SensorHubError> {
            Err(SensorHubError::Storage("store offline".into()))
        }
    }

    fn app(rows: Vec<Reading>) -> Router {
        build(AppState::new(ReadingService::new(StubStore { rows })))
    }

    fn seeded_app() -> Router {
        app(vec![
            Reading::new("dev", SensorType::Temperature, 22, 100).unwrap(),
            Reading::new("dev", SensorType::Temperature, 50, 150).unwrap(),
            Reading::new("dev", SensorType::Temperature, 100, 200).unwrap(),
        ])
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, body) = get(app(vec![]), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn should_list_readings_as_json_array() {
        let (status, body) = get(seeded_app(), "/devices/dev/readings/").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["type"], "temperature");
    }

    #[tokio::test]
    async fn should_reject_aggregates_without_type() {
        for endpoint in ["min", "max", "median", "mean", "mode", "quartiles"] {
            let uri = format!("/devices/dev/readings/{endpoint}/");
            let (status, _) = get(seeded_app(), &uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "endpoint {endpoint}");
        }
    }

    #[tokio::test]
    async fn should_reject_quartiles_without_full_range() {
        let (status, _) = get(
            seeded_app(),
            "/devices/dev/readings/quartiles/?type=temperature",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(
            seeded_app(),
            "/devices/dev/readings/quartiles/?type=temperature&start=100",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_min_and_max_as_single_element_arrays() {
        let (status, body) = get(seeded_app(), "/devices/dev/readings/min/?type=temperature").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["value"], 22);

        let (status, body) = get(seeded_app(), "/devices/dev/readings/max/?type=temperature").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["value"], 100);
    }

    #[tokio::test]
    async fn should_return_sentinel_when_no_rows_match() {
        let (status, body) =
            get(app(vec![]), "/devices/dev/readings/median/?type=temperature").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No records found");

        let (status, body) = get(app(vec![]), "/devices/dev/readings/mean/?type=temperature").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No records found");
    }

    #[tokio::test]
    async fn should_echo_device_and_type_in_median_body() {
        let (status, body) =
            get(seeded_app(), "/devices/dev/readings/median/?type=temperature").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["device_uuid"], "dev");
        assert_eq!(json["type"], "temperature");
        assert_eq!(json["value"], 50.0);
        assert_eq!(json["date_created"], 150.0);
    }

    #[tokio::test]
    async fn should_return_summary_sorted_by_count() {
        let rows = vec![
            Reading::new("a", SensorType::Temperature, 1, 10).unwrap(),
            Reading::new("b", SensorType::Temperature, 2, 10).unwrap(),
            Reading::new("b", SensorType::Temperature, 3, 20).unwrap(),
        ];
        let (status, body) = get(app(rows), "/devices/summary/").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["device_uuid"], "b");
        assert_eq!(json[0]["number_of_readings"], 2);
        assert_eq!(json[1]["device_uuid"], "a");
    }

    #[tokio::test]
    async fn should_map_store_faults_to_500() {
        let router = build(AppState::new(ReadingService::new(FailingStore)));
        let (status, body) = get(router, "/devices/dev/readings/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "internal server error");
    }

    #[tokio::test]
    async fn should_create_reading_and_return_success() {
        let response = app(vec![])
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/devices/dev/readings/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"type":"temperature","value":22}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"success");
    }

    #[tokio::test]
    async fn should_reject_invalid_ingest_payloads() {
        for payload in [
            r#"{"type":"temperature","value":101}"#,
            r#"{"type":"temperature","value":-1}"#,
            r#"{"type":"abcdef","value":50}"#,
            r#"{"value":50}"#,
            r#"{"type":"temperature"}"#,
            r#"{"type":"temperature","value":50.5}"#,
            r#"{"type":"temperature","value":"50"}"#,
            r#"{"type":"temperature","value":"#,
        ] {
            let response = app(vec![])
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/devices/dev/readings/")
                        .header("content-type", "application/json")
                        .body(Body::from(payload))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
        }
    }

    #[tokio::test]
    async fn should_reject_ingest_without_json_content_type() {
        let response = app(vec![])
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/devices/dev/readings/")
                    .body(Body::from(r#"{"type":"temperature","value":22}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
