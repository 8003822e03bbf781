use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_capture_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use shoot_capture::config::AppConfig;
use shoot_capture::error::AppError;
use shoot_capture::telemetry;
use shoot_capture::workflows::capture::{CaptureSessionService, InMemorySessionStore};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySessionStore::default());
    let capture_service = Arc::new(CaptureSessionService::new(store, config.capture.clone()));

    let app = with_capture_routes(capture_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        require_valid_completion = config.capture.require_valid_completion,
        "shoot capture service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
