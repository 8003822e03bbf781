use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use shoot_capture::error::AppError;
use shoot_capture::workflows::capture::{
    calculate_progress, catalog, recommend_next_category, validate_completion, NewSession,
    SessionProgress, ShootSession, ShotCategory, ValidationView,
};
use shoot_capture::workflows::manifest::ManifestImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SessionReportArgs {
    /// Capture manifest CSV exported by the capture device
    #[arg(long)]
    pub(crate) manifest: PathBuf,
    /// Listing square footage used to size the photo target
    #[arg(long)]
    pub(crate) square_footage: Option<u32>,
    #[arg(long, default_value = "manifest-listing")]
    pub(crate) listing_id: String,
    #[arg(long, default_value = "manifest-assignment")]
    pub(crate) assignment_id: String,
    #[arg(long, default_value = "manifest-photographer")]
    pub(crate) photographer_id: String,
    /// Session start (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_started_at)]
    pub(crate) started_at: Option<DateTime<Utc>>,
}

/// Readiness snapshot of one session, shared by the CLI and the HTTP report endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SessionReport {
    pub(crate) session: ShootSession,
    pub(crate) progress: SessionProgress,
    pub(crate) recommendation: Option<&'static ShotCategory>,
    pub(crate) validation: ValidationView,
}

impl SessionReport {
    pub(crate) fn build(session: ShootSession) -> Self {
        let progress = calculate_progress(&session);
        let recommendation = recommend_next_category(&session);
        let validation = validate_completion(&session).view();
        Self {
            session,
            progress,
            recommendation,
            validation,
        }
    }
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(catalog())?);
    Ok(())
}

pub(crate) fn run_session_report(args: SessionReportArgs) -> Result<(), AppError> {
    let SessionReportArgs {
        manifest,
        square_footage,
        listing_id,
        assignment_id,
        photographer_id,
        started_at,
    } = args;

    let request = NewSession {
        listing_id,
        assignment_id,
        photographer_id,
        square_footage,
    };
    let started_at = started_at.unwrap_or_else(Utc::now);
    let session = ManifestImporter::from_path(manifest, request, started_at)?;

    let report = SessionReport::build(session);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
