use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{catalog, find_category, ShotCategory};
use super::domain::{SessionId, Shot, ShotId, ShotMetadata, ShotStatus, ShotUpdate};
use super::progress::SessionProgress;
use super::service::{CaptureServiceError, CaptureSessionService};
use super::session::{NewSession, ShootSession};
use super::store::SessionStore;
use super::validation::ValidationView;

/// Router builder exposing the capture session endpoints.
pub fn capture_router<S>(service: Arc<CaptureSessionService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler))
        .route(
            "/api/v1/sessions",
            post(create_session_handler::<S>).get(list_sessions_handler::<S>),
        )
        .route("/api/v1/sessions/:session_id", get(get_session_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id/shots",
            post(add_shot_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/shots/:shot_id",
            patch(update_shot_handler::<S>).delete(remove_shot_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/progress",
            get(progress_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/recommendation",
            get(recommendation_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/validation",
            get(validation_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/pause",
            post(pause_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/resume",
            post(resume_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/cancel",
            post(cancel_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/complete",
            post(complete_handler::<S>),
        )
        .with_state(service)
}

type ServiceState<S> = State<Arc<CaptureSessionService<S>>>;

#[derive(Debug, Deserialize)]
pub struct AddShotRequest {
    pub category_id: String,
    pub local_ref: String,
    #[serde(default)]
    pub metadata: Option<ShotMetadata>,
}

#[derive(Debug, Serialize)]
pub struct AddShotResponse {
    pub shot: Option<Shot>,
    pub session: ShootSession,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShotRequest {
    pub status: ShotStatus,
    #[serde(flatten)]
    pub update: ShotUpdate,
}

#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub category: Option<&'static ShotCategory>,
}

pub(crate) async fn catalog_handler() -> Json<&'static [ShotCategory]> {
    Json(catalog())
}

pub(crate) async fn create_session_handler<S>(
    State(service): ServiceState<S>,
    Json(request): Json<NewSession>,
) -> Result<(StatusCode, Json<ShootSession>), CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let session = service.start(request)?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub(crate) async fn list_sessions_handler<S>(
    State(service): ServiceState<S>,
) -> Result<Json<Vec<SessionId>>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.list()?))
}

pub(crate) async fn get_session_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.get(&SessionId(session_id))?))
}

pub(crate) async fn add_shot_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
    Json(request): Json<AddShotRequest>,
) -> Result<(StatusCode, Json<AddShotResponse>), CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let category = find_category(&request.category_id)
        .ok_or_else(|| CaptureServiceError::UnknownCategory(request.category_id.clone()))?;

    let session = service.add_shot(
        &SessionId(session_id),
        category.id,
        request.local_ref,
        request.metadata,
    )?;
    let shot = session.shots().last().cloned();
    Ok((StatusCode::CREATED, Json(AddShotResponse { shot, session })))
}

pub(crate) async fn remove_shot_handler<S>(
    State(service): ServiceState<S>,
    Path((session_id, shot_id)): Path<(String, String)>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let session = service.remove_shot(&SessionId(session_id), &ShotId(shot_id))?;
    Ok(Json(session))
}

pub(crate) async fn update_shot_handler<S>(
    State(service): ServiceState<S>,
    Path((session_id, shot_id)): Path<(String, String)>,
    Json(request): Json<UpdateShotRequest>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let session = service.update_shot_status(
        &SessionId(session_id),
        &ShotId(shot_id),
        request.status,
        request.update,
    )?;
    Ok(Json(session))
}

pub(crate) async fn progress_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionProgress>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.progress(&SessionId(session_id))?))
}

pub(crate) async fn recommendation_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<RecommendationView>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let category = service.recommendation(&SessionId(session_id))?;
    Ok(Json(RecommendationView { category }))
}

pub(crate) async fn validation_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ValidationView>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    let report = service.validation(&SessionId(session_id))?;
    Ok(Json(report.view()))
}

pub(crate) async fn pause_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.pause(&SessionId(session_id))?))
}

pub(crate) async fn resume_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.resume(&SessionId(session_id))?))
}

pub(crate) async fn cancel_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.cancel(&SessionId(session_id))?))
}

pub(crate) async fn complete_handler<S>(
    State(service): ServiceState<S>,
    Path(session_id): Path<String>,
) -> Result<Json<ShootSession>, CaptureServiceError>
where
    S: SessionStore + 'static,
{
    Ok(Json(service.complete(&SessionId(session_id))?))
}

impl IntoResponse for CaptureServiceError {
    fn into_response(self) -> Response {
        let (status, payload) = match &self {
            CaptureServiceError::NotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            CaptureServiceError::UnknownCategory(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string() }),
            ),
            CaptureServiceError::CompletionBlocked(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "capture session cannot be completed",
                    "validation": report.view(),
                }),
            ),
            CaptureServiceError::Corrupt(_)
            | CaptureServiceError::Codec(_)
            | CaptureServiceError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(payload)).into_response()
    }
}
