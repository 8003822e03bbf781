use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::CaptureConfig;
use crate::workflows::capture::catalog::{catalog, required_categories};
use crate::workflows::capture::domain::{SessionId, ShotId, ShotStatus, ShotUpdate};
use crate::workflows::capture::service::CaptureSessionService;
use crate::workflows::capture::session::{NewSession, ShootSession};
use crate::workflows::capture::store::{InMemorySessionStore, SessionStore, StoreError};

pub(super) fn new_session_request(square_footage: Option<u32>) -> NewSession {
    NewSession {
        listing_id: "listing-42".to_string(),
        assignment_id: "assignment-42".to_string(),
        photographer_id: "photographer-42".to_string(),
        square_footage,
    }
}

pub(super) fn gated_config() -> CaptureConfig {
    CaptureConfig {
        require_valid_completion: true,
    }
}

pub(super) fn service() -> (
    CaptureSessionService<InMemorySessionStore>,
    Arc<InMemorySessionStore>,
) {
    let store = Arc::new(InMemorySessionStore::default());
    let service = CaptureSessionService::new(store.clone(), gated_config());
    (service, store)
}

/// Capture the required minimum for every required category and mark it uploaded.
pub(super) fn capture_required_minimum(
    service: &CaptureSessionService<InMemorySessionStore>,
    id: &SessionId,
) -> ShootSession {
    for entry in required_categories() {
        for index in 0..entry.min_shots {
            service
                .add_shot(id, entry.id, format!("{}-{index}.jpg", entry.id), None)
                .expect("shot added");
        }
    }
    upload_everything(service, id)
}

/// Capture at least one shot in every catalog category and mark it uploaded.
pub(super) fn capture_full_catalog(
    service: &CaptureSessionService<InMemorySessionStore>,
    id: &SessionId,
) -> ShootSession {
    for entry in catalog() {
        for index in 0..entry.min_shots.max(2) {
            service
                .add_shot(id, entry.id, format!("{}-{index}.jpg", entry.id), None)
                .expect("shot added");
        }
    }
    upload_everything(service, id)
}

pub(super) fn upload_everything(
    service: &CaptureSessionService<InMemorySessionStore>,
    id: &SessionId,
) -> ShootSession {
    let pending: Vec<ShotId> = service
        .get(id)
        .expect("session stored")
        .shots()
        .iter()
        .filter(|shot| shot.status != ShotStatus::Uploaded)
        .map(|shot| shot.id.clone())
        .collect();

    for shot_id in &pending {
        service
            .update_shot_status(
                id,
                shot_id,
                ShotStatus::Uploaded,
                ShotUpdate::uploaded(format!("cdn/{shot_id}")),
            )
            .expect("status updated");
    }
    service.get(id).expect("session stored")
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn load(&self, _id: &SessionId) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _id: &SessionId, _encoded: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list_ids(&self) -> Result<Vec<SessionId>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
