use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for capture sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for shots; unique within the owning session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShotId(pub String);

impl ShotId {
    pub(crate) fn generate() -> Self {
        Self(format!("shot-{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shot categories known to the catalog.
///
/// Variants are declared in catalog order; `catalog::category` indexes the
/// catalog by discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    ExteriorFront,
    ExteriorRear,
    LivingRoom,
    Kitchen,
    PrimaryBedroom,
    PrimaryBathroom,
    DiningRoom,
    Bedroom,
    Bathroom,
    FamilyRoom,
    Backyard,
    Garage,
    Amenities,
    Aerial,
    Details,
}

impl CategoryId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExteriorFront => "exterior_front",
            Self::ExteriorRear => "exterior_rear",
            Self::LivingRoom => "living_room",
            Self::Kitchen => "kitchen",
            Self::PrimaryBedroom => "primary_bedroom",
            Self::PrimaryBathroom => "primary_bathroom",
            Self::DiningRoom => "dining_room",
            Self::Bedroom => "bedroom",
            Self::Bathroom => "bathroom",
            Self::FamilyRoom => "family_room",
            Self::Backyard => "backyard",
            Self::Garage => "garage",
            Self::Amenities => "amenities",
            Self::Aerial => "aerial",
            Self::Details => "details",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload lifecycle reported by the upload pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotStatus {
    Pending,
    Uploading,
    Uploaded,
    Failed,
}

impl ShotStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::Failed => "failed",
        }
    }
}

/// Coarse state of the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Paused,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Technical details reported by the capture device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capture: BTreeMap<String, String>,
}

/// One captured image and its upload state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub id: ShotId,
    pub category: CategoryId,
    pub local_ref: String,
    #[serde(default)]
    pub remote_ref: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub status: ShotStatus,
    #[serde(default)]
    pub upload_progress: Option<u8>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub metadata: Option<ShotMetadata>,
}

impl Shot {
    pub(crate) fn pending(
        category: CategoryId,
        local_ref: String,
        captured_at: DateTime<Utc>,
        metadata: Option<ShotMetadata>,
    ) -> Self {
        Self {
            id: ShotId::generate(),
            category,
            local_ref,
            remote_ref: None,
            captured_at,
            status: ShotStatus::Pending,
            upload_progress: None,
            error: None,
            metadata,
        }
    }

    pub(crate) fn apply_status(&mut self, status: ShotStatus, update: ShotUpdate) {
        self.status = status;
        if let Some(progress) = update.upload_progress {
            self.upload_progress = Some(progress.min(100));
        }
        if let Some(remote_ref) = update.remote_ref {
            self.remote_ref = Some(remote_ref);
        }
        if let Some(error) = update.error {
            self.error = Some(error);
        }
    }
}

/// Optional fields merged into a shot alongside a status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotUpdate {
    #[serde(default)]
    pub upload_progress: Option<u8>,
    #[serde(default)]
    pub remote_ref: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ShotUpdate {
    pub fn progress(percent: u8) -> Self {
        Self {
            upload_progress: Some(percent),
            ..Self::default()
        }
    }

    pub fn uploaded(remote_ref: impl Into<String>) -> Self {
        Self {
            upload_progress: Some(100),
            remote_ref: Some(remote_ref.into()),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Running shot counter for one catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotCategoryProgress {
    pub category_id: CategoryId,
    pub shot_count: u32,
    pub is_complete: bool,
}

impl ShotCategoryProgress {
    pub(crate) fn empty(category_id: CategoryId, min_shots: u32) -> Self {
        Self {
            category_id,
            shot_count: 0,
            is_complete: min_shots == 0,
        }
    }

    pub(crate) fn set_count(&mut self, shot_count: u32, min_shots: u32) {
        self.shot_count = shot_count;
        self.is_complete = shot_count >= min_shots;
    }
}
