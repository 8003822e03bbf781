use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::{catalog, category};
use super::domain::{
    CategoryId, SessionId, SessionStatus, Shot, ShotCategoryProgress, ShotId, ShotMetadata,
    ShotStatus, ShotUpdate,
};

/// Photo count applied when the listing has no square footage on record.
const DEFAULT_REQUIRED_PHOTOS: u32 = 25;

/// Number of photos a listing of the given size must deliver.
pub fn required_photos(square_footage: Option<u32>) -> u32 {
    match square_footage {
        None => DEFAULT_REQUIRED_PHOTOS,
        Some(sqft) if sqft < 1500 => 20,
        Some(sqft) if sqft <= 2500 => 25,
        Some(sqft) if sqft <= 3500 => 35,
        Some(sqft) if sqft <= 5000 => 45,
        Some(_) => 60,
    }
}

/// Inputs required to open a capture session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub listing_id: String,
    pub assignment_id: String,
    pub photographer_id: String,
    #[serde(default)]
    pub square_footage: Option<u32>,
}

/// Aggregate root for one photographer's pass over one listing.
///
/// Mutators consume the session and hand back the updated value. Shots and
/// category counters are only reachable through those mutators so the
/// counters always agree with the shot list. Identity and the photo target
/// are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShootSession {
    pub(super) id: SessionId,
    pub(super) listing_id: String,
    pub(super) assignment_id: String,
    pub(super) photographer_id: String,
    pub(super) started_at: DateTime<Utc>,
    pub(super) completed_at: Option<DateTime<Utc>>,
    pub(super) status: SessionStatus,
    pub(super) shots: Vec<Shot>,
    pub(super) category_progress: Vec<ShotCategoryProgress>,
    pub(super) notes: String,
    pub(super) total_photos_required: u32,
}

/// Stored form of a session. Counters are not read back; they are rebuilt
/// from the shot list.
#[derive(Debug, Deserialize)]
pub(super) struct StoredSession {
    id: SessionId,
    listing_id: String,
    assignment_id: String,
    photographer_id: String,
    started_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
    status: SessionStatus,
    #[serde(default)]
    shots: Vec<Shot>,
    #[serde(default)]
    notes: String,
    total_photos_required: u32,
}

impl StoredSession {
    pub(super) fn into_session(self) -> ShootSession {
        let mut session = ShootSession {
            id: self.id,
            listing_id: self.listing_id,
            assignment_id: self.assignment_id,
            photographer_id: self.photographer_id,
            started_at: self.started_at,
            completed_at: self.completed_at,
            status: self.status,
            shots: self.shots,
            category_progress: fresh_progress(),
            notes: self.notes,
            total_photos_required: self.total_photos_required,
        };
        session.rebuild_progress();
        session
    }
}

impl ShootSession {
    pub fn create(
        listing_id: impl Into<String>,
        assignment_id: impl Into<String>,
        photographer_id: impl Into<String>,
        square_footage: Option<u32>,
    ) -> Self {
        Self::create_at(
            listing_id,
            assignment_id,
            photographer_id,
            square_footage,
            Utc::now(),
        )
    }

    pub fn create_at(
        listing_id: impl Into<String>,
        assignment_id: impl Into<String>,
        photographer_id: impl Into<String>,
        square_footage: Option<u32>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let session = Self {
            id: SessionId::generate(),
            listing_id: listing_id.into(),
            assignment_id: assignment_id.into(),
            photographer_id: photographer_id.into(),
            started_at,
            completed_at: None,
            status: SessionStatus::InProgress,
            shots: Vec::new(),
            category_progress: fresh_progress(),
            notes: String::new(),
            total_photos_required: required_photos(square_footage),
        };

        debug!(
            session_id = %session.id,
            listing_id = %session.listing_id,
            required = session.total_photos_required,
            "capture session created"
        );
        session
    }

    pub fn from_request(request: NewSession) -> Self {
        Self::create(
            request.listing_id,
            request.assignment_id,
            request.photographer_id,
            request.square_footage,
        )
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub fn assignment_id(&self) -> &str {
        &self.assignment_id
    }

    pub fn photographer_id(&self) -> &str {
        &self.photographer_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Photo target derived from square footage when the session was opened.
    pub fn total_photos_required(&self) -> u32 {
        self.total_photos_required
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shot(&self, shot_id: &ShotId) -> Option<&Shot> {
        self.shots.iter().find(|shot| &shot.id == shot_id)
    }

    /// Counters in catalog order, one per category.
    pub fn category_progress(&self) -> &[ShotCategoryProgress] {
        &self.category_progress
    }

    pub fn progress_for(&self, category_id: CategoryId) -> Option<&ShotCategoryProgress> {
        self.category_progress
            .iter()
            .find(|entry| entry.category_id == category_id)
    }

    pub fn count_with_status(&self, status: ShotStatus) -> usize {
        self.shots.iter().filter(|shot| shot.status == status).count()
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn add_shot(
        self,
        category_id: CategoryId,
        local_ref: impl Into<String>,
        metadata: Option<ShotMetadata>,
    ) -> Self {
        self.add_shot_at(category_id, local_ref, metadata, Utc::now())
    }

    pub fn add_shot_at(
        mut self,
        category_id: CategoryId,
        local_ref: impl Into<String>,
        metadata: Option<ShotMetadata>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        self.warn_if_closed("add_shot");

        let shot = Shot::pending(category_id, local_ref.into(), captured_at, metadata);
        debug!(session_id = %self.id, shot_id = %shot.id, category = %category_id, "shot captured");
        self.shots.push(shot);
        self.recount(category_id);
        self
    }

    /// Drop a shot; unknown identifiers leave the session untouched.
    pub fn remove_shot(mut self, shot_id: &ShotId) -> Self {
        let Some(position) = self.shots.iter().position(|shot| &shot.id == shot_id) else {
            debug!(session_id = %self.id, %shot_id, "remove_shot ignored unknown shot");
            return self;
        };

        self.warn_if_closed("remove_shot");
        let removed = self.shots.remove(position);
        self.recount(removed.category);
        self
    }

    /// Absorb an upload pipeline report for one shot.
    pub fn update_shot_status(
        mut self,
        shot_id: &ShotId,
        status: ShotStatus,
        update: ShotUpdate,
    ) -> Self {
        match self.shots.iter_mut().find(|shot| &shot.id == shot_id) {
            Some(shot) => {
                shot.apply_status(status, update);
                debug!(
                    session_id = %self.id,
                    %shot_id,
                    status = status.label(),
                    "shot status updated"
                );
            }
            None => {
                debug!(session_id = %self.id, %shot_id, "update_shot_status ignored unknown shot");
            }
        }
        self
    }

    /// Recompute every counter from the shot list.
    fn rebuild_progress(&mut self) {
        self.category_progress = fresh_progress();
        for entry in catalog() {
            self.recount(entry.id);
        }
    }

    fn recount(&mut self, category_id: CategoryId) {
        let count = self
            .shots
            .iter()
            .filter(|shot| shot.category == category_id)
            .count() as u32;
        let min_shots = category(category_id).min_shots;

        if let Some(entry) = self
            .category_progress
            .iter_mut()
            .find(|entry| entry.category_id == category_id)
        {
            entry.set_count(count, min_shots);
        }
    }

    fn warn_if_closed(&self, operation: &'static str) {
        if self.status.is_terminal() {
            warn!(
                session_id = %self.id,
                status = self.status.label(),
                operation,
                "mutating a closed capture session"
            );
        }
    }
}

fn fresh_progress() -> Vec<ShotCategoryProgress> {
    catalog()
        .iter()
        .map(|entry| ShotCategoryProgress::empty(entry.id, entry.min_shots))
        .collect()
}
