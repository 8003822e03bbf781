use crate::infra::AppState;
use crate::report::SessionReport;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use shoot_capture::error::AppError;
use shoot_capture::workflows::capture::{
    capture_router, CaptureSessionService, NewSession, SessionStore,
};
use shoot_capture::workflows::manifest::ManifestImporter;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ManifestReportRequest {
    #[serde(flatten)]
    pub(crate) session: NewSession,
    #[serde(default)]
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) manifest_csv: String,
}

pub(crate) fn with_capture_routes<S>(service: Arc<CaptureSessionService<S>>) -> axum::Router
where
    S: SessionStore + 'static,
{
    capture_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/manifest/report",
            axum::routing::post(manifest_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless readiness report for a manifest posted inline; nothing is stored.
pub(crate) async fn manifest_report_endpoint(
    Json(payload): Json<ManifestReportRequest>,
) -> Result<Json<SessionReport>, AppError> {
    let ManifestReportRequest {
        session,
        started_at,
        manifest_csv,
    } = payload;

    let reader = Cursor::new(manifest_csv.into_bytes());
    let started_at = started_at.unwrap_or_else(Utc::now);
    let session = ManifestImporter::from_reader(reader, session, started_at)?;
    Ok(Json(SessionReport::build(session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use shoot_capture::config::CaptureConfig;
    use shoot_capture::workflows::capture::{CategoryId, InMemorySessionStore};
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(CaptureSessionService::new(
            Arc::new(InMemorySessionStore::default()),
            CaptureConfig::default(),
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        with_capture_routes(service).layer(Extension(state))
    }

    fn report_request(manifest_csv: &str) -> ManifestReportRequest {
        ManifestReportRequest {
            session: NewSession {
                listing_id: "listing-9".to_string(),
                assignment_id: "assignment-9".to_string(),
                photographer_id: "photographer-9".to_string(),
                square_footage: Some(3000),
            },
            started_at: None,
            manifest_csv: manifest_csv.to_string(),
        }
    }

    #[tokio::test]
    async fn readiness_reflects_the_flag() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn capture_routes_are_mounted_alongside_operational_endpoints() {
        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/catalog")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body.as_array().map(Vec::len), Some(15));

        let response = app(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn manifest_report_endpoint_summarises_inline_manifest() {
        let request = report_request(
            "Category,File,Status\nKitchen,k1.jpg,uploaded\nKitchen,k2.jpg,failed\n",
        );

        let Json(report) = manifest_report_endpoint(Json(request))
            .await
            .expect("report builds");

        assert_eq!(report.session.total_photos_required(), 35);
        assert_eq!(report.progress.total_shots, 2);
        assert_eq!(report.progress.failed, 1);
        assert_eq!(
            report.recommendation.map(|category| category.id),
            Some(CategoryId::ExteriorFront)
        );
        assert!(!report.validation.is_valid);
        assert!(report
            .validation
            .errors
            .iter()
            .any(|error| error.starts_with("1 ")));
    }

    #[tokio::test]
    async fn manifest_report_endpoint_rejects_unknown_categories() {
        let request = report_request("Category,File\nWine Cellar,w1.jpg\n");

        let error = manifest_report_endpoint(Json(request))
            .await
            .expect_err("unknown category rejected");
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
