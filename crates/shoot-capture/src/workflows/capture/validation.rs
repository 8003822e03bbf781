use serde::Serialize;

use super::catalog::required_categories;
use super::progress::calculate_progress;
use super::session::ShootSession;

/// Problems that block a session from being submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required categories: {}", .categories.join(", "))]
    MissingRequiredCategories { categories: Vec<&'static str> },
    #[error("{count} shot(s) failed to upload")]
    FailedUploads { count: usize },
    #[error("{count} shot(s) are still pending or uploading")]
    UnresolvedUploads { count: usize },
}

/// Advisory findings that never block submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationWarning {
    #[error("Only {captured} of {required} required photos captured")]
    BelowPhotoTarget { captured: usize, required: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn view(&self) -> ValidationView {
        ValidationView {
            is_valid: self.is_valid,
            errors: self.error_messages(),
            warnings: self.warning_messages(),
        }
    }
}

/// Rendered report handed to API and CLI callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationView {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Gate run before a session may be completed.
pub fn validate_completion(session: &ShootSession) -> ValidationReport {
    let progress = calculate_progress(session);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let missing: Vec<&'static str> = required_categories()
        .filter(|entry| {
            !session
                .progress_for(entry.id)
                .is_some_and(|progress| progress.is_complete)
        })
        .map(|entry| entry.label)
        .collect();
    if !missing.is_empty() {
        errors.push(ValidationError::MissingRequiredCategories {
            categories: missing,
        });
    }

    if progress.failed > 0 {
        errors.push(ValidationError::FailedUploads {
            count: progress.failed,
        });
    }

    let unresolved = progress.pending + progress.uploading;
    if unresolved > 0 {
        errors.push(ValidationError::UnresolvedUploads { count: unresolved });
    }

    if progress.total_shots < progress.total_photos_required as usize {
        warnings.push(ValidationWarning::BelowPhotoTarget {
            captured: progress.total_shots,
            required: progress.total_photos_required,
        });
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::capture::domain::{CategoryId, ShotStatus, ShotUpdate};

    fn session() -> ShootSession {
        ShootSession::create("listing-2", "assignment-2", "photographer-2", None)
    }

    fn upload_all(session: ShootSession) -> ShootSession {
        let ids: Vec<_> = session.shots().iter().map(|shot| shot.id.clone()).collect();
        ids.iter().fold(session, |session, id| {
            session.update_shot_status(id, ShotStatus::Uploaded, ShotUpdate::uploaded("cdn"))
        })
    }

    fn required_at_minimum() -> ShootSession {
        let session = required_categories().fold(session(), |session, entry| {
            (0..entry.min_shots).fold(session, |session, index| {
                session.add_shot(entry.id, format!("{}-{index}", entry.id), None)
            })
        });
        upload_all(session)
    }

    #[test]
    fn empty_session_lists_every_required_category() {
        let report = validate_completion(&session());

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        let message = report.errors[0].to_string();
        for label in required_categories().map(|entry| entry.label) {
            assert!(message.contains(label), "{message} should name {label}");
        }
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::BelowPhotoTarget {
                captured: 0,
                required: 25
            }]
        );
    }

    #[test]
    fn failed_upload_is_reported_with_its_count() {
        let session = session().add_shot(CategoryId::Kitchen, "k1", None);
        let shot_id = session.shots()[0].id.clone();
        let session =
            session.update_shot_status(&shot_id, ShotStatus::Failed, ShotUpdate::failed("timeout"));

        let report = validate_completion(&session);
        let failed: Vec<String> = report
            .error_messages()
            .into_iter()
            .filter(|message| message.contains("failed"))
            .collect();
        assert_eq!(failed, vec!["1 shot(s) failed to upload".to_string()]);
        assert!(report
            .errors
            .iter()
            .all(|error| !matches!(error, ValidationError::UnresolvedUploads { .. })));
    }

    #[test]
    fn pending_and_uploading_shots_block_completion() {
        let session = required_at_minimum()
            .add_shot(CategoryId::Details, "d1", None)
            .add_shot(CategoryId::Details, "d2", None);
        let uploading = session.shots()[session.shots().len() - 1].id.clone();
        let session =
            session.update_shot_status(&uploading, ShotStatus::Uploading, ShotUpdate::progress(30));

        let report = validate_completion(&session);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![ValidationError::UnresolvedUploads { count: 2 }]
        );
    }

    #[test]
    fn required_minimums_below_photo_target_only_warn() {
        let report = validate_completion(&required_at_minimum());

        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warning_messages()[0],
            "Only 15 of 25 required photos captured"
        );
    }

    #[test]
    fn fully_uploaded_session_passes_cleanly() {
        let session = (0..10).fold(required_at_minimum(), |session, index| {
            session.add_shot(CategoryId::Details, format!("detail-{index}"), None)
        });
        let report = validate_completion(&upload_all(session));

        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.view(),
            ValidationView {
                is_valid: true,
                errors: Vec::new(),
                warnings: Vec::new(),
            }
        );
    }
}
