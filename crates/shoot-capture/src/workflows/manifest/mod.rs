//! Rebuild capture sessions from CSV capture manifests exported by field devices.

mod mapping;
mod parser;

pub use parser::parse_timestamp;

use crate::workflows::capture::{NewSession, ShootSession, ShotStatus, ShotUpdate};
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use parser::ManifestRecord;

#[derive(Debug, thiserror::Error)]
pub enum ManifestImportError {
    #[error("failed to read capture manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid capture manifest CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown shot category '{value}'")]
    UnknownCategory { row: usize, value: String },
    #[error("row {row}: unknown upload status '{value}'")]
    UnknownStatus { row: usize, value: String },
    #[error("row {row}: unreadable capture timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

pub struct ManifestImporter;

impl ManifestImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        request: NewSession,
        started_at: DateTime<Utc>,
    ) -> Result<ShootSession, ManifestImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, request, started_at)
    }

    /// Replay every manifest row through the session mutators.
    ///
    /// Rows without a capture timestamp are stamped with `started_at`.
    pub fn from_reader<R: Read>(
        reader: R,
        request: NewSession,
        started_at: DateTime<Utc>,
    ) -> Result<ShootSession, ManifestImportError> {
        let mut session = ShootSession::create_at(
            request.listing_id,
            request.assignment_id,
            request.photographer_id,
            request.square_footage,
            started_at,
        );

        for record in parser::parse_records(reader)? {
            session = apply_record(session, record, started_at)?;
        }

        debug!(
            session_id = %session.id(),
            shots = session.shots().len(),
            "capture manifest imported"
        );
        Ok(session)
    }
}

fn apply_record(
    session: ShootSession,
    record: ManifestRecord,
    started_at: DateTime<Utc>,
) -> Result<ShootSession, ManifestImportError> {
    let category = mapping::category_for(&record.category).ok_or_else(|| {
        ManifestImportError::UnknownCategory {
            row: record.row,
            value: record.category.clone(),
        }
    })?;

    let status = match record.status.as_deref() {
        None => ShotStatus::Pending,
        Some(raw) => {
            mapping::status_for(raw).ok_or_else(|| ManifestImportError::UnknownStatus {
                row: record.row,
                value: raw.to_string(),
            })?
        }
    };

    let captured_at = match record.captured_at {
        None => started_at,
        Some(raw) => parse_timestamp(&raw)
            .ok_or(ManifestImportError::InvalidTimestamp {
                row: record.row,
                value: raw,
            })?,
    };
    let session = session.add_shot_at(category.id, record.file, None, captured_at);
    if status == ShotStatus::Pending {
        return Ok(session);
    }

    let Some(shot_id) = session.shots().last().map(|shot| shot.id.clone()) else {
        return Ok(session);
    };
    let update = ShotUpdate {
        upload_progress: record.progress,
        remote_ref: record.remote_ref,
        error: record.error,
    };
    Ok(session.update_shot_status(&shot_id, status, update))
}
