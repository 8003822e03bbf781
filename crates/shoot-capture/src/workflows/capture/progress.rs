use serde::Serialize;

use super::catalog::{catalog, required_categories};
use super::domain::{CategoryId, ShotStatus};
use super::session::ShootSession;

/// Point-in-time snapshot derived from a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionProgress {
    pub total_shots: usize,
    pub pending: usize,
    pub uploading: usize,
    pub uploaded: usize,
    pub failed: usize,
    /// Mean progress of shots currently uploading; other statuses are excluded.
    pub average_upload_progress: f32,
    pub required_categories_complete: usize,
    pub required_categories_total: usize,
    pub total_photos_required: u32,
    pub is_minimum_met: bool,
    pub percent_complete: u8,
    pub categories: Vec<CategoryProgressEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgressEntry {
    pub category_id: CategoryId,
    pub label: &'static str,
    pub required: bool,
    pub shot_count: u32,
    pub min_shots: u32,
    pub max_shots: u32,
    pub is_complete: bool,
    pub over_max: bool,
}

pub fn calculate_progress(session: &ShootSession) -> SessionProgress {
    let shots = session.shots();
    let total_shots = shots.len();

    let mut pending = 0;
    let mut uploading = 0;
    let mut uploaded = 0;
    let mut failed = 0;
    let mut upload_progress_sum = 0u32;

    for shot in shots {
        match shot.status {
            ShotStatus::Pending => pending += 1,
            ShotStatus::Uploading => {
                uploading += 1;
                upload_progress_sum += u32::from(shot.upload_progress.unwrap_or(0));
            }
            ShotStatus::Uploaded => uploaded += 1,
            ShotStatus::Failed => failed += 1,
        }
    }

    let average_upload_progress = if uploading == 0 {
        0.0
    } else {
        upload_progress_sum as f32 / uploading as f32
    };

    let required_categories_total = required_categories().count();
    let required_categories_complete = required_categories()
        .filter(|entry| {
            session
                .progress_for(entry.id)
                .is_some_and(|progress| progress.is_complete)
        })
        .count();

    let total_photos_required = session.total_photos_required;
    let is_minimum_met = required_categories_complete == required_categories_total
        && total_shots >= total_photos_required as usize;

    let category_ratio = ratio(required_categories_complete, required_categories_total);
    let volume_ratio = ratio(total_shots, total_photos_required as usize).min(1.0);
    let percent_complete = ((0.5 * category_ratio + 0.5 * volume_ratio) * 100.0).round() as u8;

    let categories = catalog()
        .iter()
        .map(|entry| {
            let shot_count = session
                .progress_for(entry.id)
                .map(|progress| progress.shot_count)
                .unwrap_or(0);
            CategoryProgressEntry {
                category_id: entry.id,
                label: entry.label,
                required: entry.required,
                shot_count,
                min_shots: entry.min_shots,
                max_shots: entry.max_shots,
                is_complete: shot_count >= entry.min_shots,
                over_max: shot_count > entry.max_shots,
            }
        })
        .collect();

    SessionProgress {
        total_shots,
        pending,
        uploading,
        uploaded,
        failed,
        average_upload_progress,
        required_categories_complete,
        required_categories_total,
        total_photos_required,
        is_minimum_met,
        percent_complete,
        categories,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}
