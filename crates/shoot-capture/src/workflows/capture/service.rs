use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::catalog::ShotCategory;
use super::codec::{deserialize_session, serialize_session, CodecError};
use super::domain::{CategoryId, SessionId, ShotId, ShotMetadata, ShotStatus, ShotUpdate};
use super::progress::{calculate_progress, SessionProgress};
use super::recommendation::recommend_next_category;
use super::session::{NewSession, ShootSession};
use super::store::{SessionStore, StoreError};
use super::validation::{validate_completion, ValidationReport};
use crate::config::CaptureConfig;

/// Service owning the load/mutate/save cycle against a [`SessionStore`].
///
/// Every mutation holds `write_lock` from load to save, so two callers can
/// never apply mutators to the same stale copy.
pub struct CaptureSessionService<S> {
    store: Arc<S>,
    config: CaptureConfig,
    write_lock: Mutex<()>,
}

impl<S> CaptureSessionService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, config: CaptureConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Open a new session and persist it.
    pub fn start(&self, request: NewSession) -> Result<ShootSession, CaptureServiceError> {
        let session = ShootSession::from_request(request);
        self.persist(&session)?;
        info!(
            session_id = %session.id,
            listing_id = %session.listing_id,
            required = session.total_photos_required,
            "capture session started"
        );
        Ok(session)
    }

    pub fn get(&self, id: &SessionId) -> Result<ShootSession, CaptureServiceError> {
        let raw = self
            .store
            .load(id)?
            .ok_or_else(|| CaptureServiceError::NotFound(id.clone()))?;
        deserialize_session(&raw).ok_or_else(|| CaptureServiceError::Corrupt(id.clone()))
    }

    pub fn list(&self) -> Result<Vec<SessionId>, CaptureServiceError> {
        Ok(self.store.list_ids()?)
    }

    pub fn add_shot(
        &self,
        id: &SessionId,
        category_id: CategoryId,
        local_ref: String,
        metadata: Option<ShotMetadata>,
    ) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| {
            Ok(session.add_shot(category_id, local_ref, metadata))
        })
    }

    pub fn remove_shot(
        &self,
        id: &SessionId,
        shot_id: &ShotId,
    ) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| Ok(session.remove_shot(shot_id)))
    }

    pub fn update_shot_status(
        &self,
        id: &SessionId,
        shot_id: &ShotId,
        status: ShotStatus,
        update: ShotUpdate,
    ) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| {
            Ok(session.update_shot_status(shot_id, status, update))
        })
    }

    pub fn pause(&self, id: &SessionId) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| Ok(session.pause()))
    }

    pub fn resume(&self, id: &SessionId) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| Ok(session.resume()))
    }

    pub fn cancel(&self, id: &SessionId) -> Result<ShootSession, CaptureServiceError> {
        self.mutate(id, |session| Ok(session.cancel()))
    }

    /// Complete the session, refusing when validation fails and the gate is enabled.
    pub fn complete(&self, id: &SessionId) -> Result<ShootSession, CaptureServiceError> {
        let gated = self.config.require_valid_completion;
        self.mutate(id, |session| {
            if gated {
                let report = validate_completion(&session);
                if !report.is_valid {
                    warn!(
                        session_id = %session.id,
                        errors = report.errors.len(),
                        "capture session completion blocked"
                    );
                    return Err(CaptureServiceError::CompletionBlocked(report));
                }
            }
            Ok(session.complete())
        })
    }

    pub fn progress(&self, id: &SessionId) -> Result<SessionProgress, CaptureServiceError> {
        Ok(calculate_progress(&self.get(id)?))
    }

    pub fn recommendation(
        &self,
        id: &SessionId,
    ) -> Result<Option<&'static ShotCategory>, CaptureServiceError> {
        Ok(recommend_next_category(&self.get(id)?))
    }

    pub fn validation(&self, id: &SessionId) -> Result<ValidationReport, CaptureServiceError> {
        Ok(validate_completion(&self.get(id)?))
    }

    fn mutate<F>(&self, id: &SessionId, apply: F) -> Result<ShootSession, CaptureServiceError>
    where
        F: FnOnce(ShootSession) -> Result<ShootSession, CaptureServiceError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("capture write lock poisoned".to_string()))?;

        let session = self.get(id)?;
        let updated = apply(session)?;
        self.persist(&updated)?;
        Ok(updated)
    }

    fn persist(&self, session: &ShootSession) -> Result<(), CaptureServiceError> {
        let encoded = serialize_session(session)?;
        self.store.save(&session.id, encoded)?;
        Ok(())
    }
}

/// Error raised by the capture session service.
#[derive(Debug, thiserror::Error)]
pub enum CaptureServiceError {
    #[error("capture session {0} not found")]
    NotFound(SessionId),
    #[error("stored capture session {0} could not be decoded")]
    Corrupt(SessionId),
    #[error("unknown shot category '{0}'")]
    UnknownCategory(String),
    #[error("capture session cannot be completed: {}", .0.error_messages().join("; "))]
    CompletionBlocked(ValidationReport),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
