use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::capture::CaptureServiceError;
use crate::workflows::manifest::ManifestImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Top-level error for the capture service binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture workflow error: {0}")]
    Capture(#[from] CaptureServiceError),
    #[error("manifest import error: {0}")]
    Manifest(#[from] ManifestImportError),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Capture(err) => err.into_response(),
            AppError::Manifest(_) => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Output(_) => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_errors_are_bad_requests() {
        let error = AppError::Manifest(ManifestImportError::UnknownCategory {
            row: 3,
            value: "wine cellar".to_string(),
        });
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn encoding_failures_surface_through_the_capture_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let error = AppError::from(CaptureServiceError::from(
            crate::workflows::capture::CodecError::from(json_error),
        ));
        assert!(matches!(error, AppError::Capture(CaptureServiceError::Codec(_))));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn capture_errors_keep_their_status() {
        let error = AppError::Capture(CaptureServiceError::NotFound(
            crate::workflows::capture::SessionId("missing".to_string()),
        ));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
