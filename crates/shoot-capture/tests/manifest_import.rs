use chrono::{TimeZone, Utc};
use shoot_capture::workflows::capture::{
    calculate_progress, recommend_next_category, validate_completion, CategoryId, NewSession,
    ShotStatus,
};
use shoot_capture::workflows::manifest::{ManifestImportError, ManifestImporter};

fn request(square_footage: Option<u32>) -> NewSession {
    NewSession {
        listing_id: "listing-4471".to_string(),
        assignment_id: "assignment-88".to_string(),
        photographer_id: "photographer-12".to_string(),
        square_footage,
    }
}

#[test]
fn sample_manifest_rebuilds_a_partially_uploaded_shoot() {
    let data = include_bytes!("../capture_manifest_sample.csv");
    let started_at = Utc
        .with_ymd_and_hms(2025, 10, 2, 9, 0, 0)
        .single()
        .expect("valid start");

    let session = ManifestImporter::from_reader(&data[..], request(Some(1400)), started_at)
        .expect("sample manifest imports");

    assert_eq!(session.shots().len(), 15);
    assert_eq!(session.total_photos_required(), 20);
    assert_eq!(session.count_with_status(ShotStatus::Uploaded), 12);

    let progress = calculate_progress(&session);
    assert_eq!(progress.failed, 1);
    assert_eq!(progress.uploading, 1);
    assert_eq!(progress.pending, 1);
    assert_eq!(progress.average_upload_progress, 60.0);
    assert_eq!(progress.required_categories_complete, 5);
    assert_eq!(progress.percent_complete, 79);

    assert_eq!(
        recommend_next_category(&session).map(|entry| entry.id),
        Some(CategoryId::PrimaryBathroom)
    );

    let report = validate_completion(&session);
    assert_eq!(
        report.error_messages(),
        vec![
            "Missing required categories: Primary Bathroom".to_string(),
            "1 shot(s) failed to upload".to_string(),
            "2 shot(s) are still pending or uploading".to_string(),
        ]
    );
    assert_eq!(
        report.warning_messages(),
        vec!["Only 15 of 20 required photos captured".to_string()]
    );
}

#[test]
fn manifest_errors_report_the_offending_row() {
    let csv = "Category,File,Status\nKitchen,k1.jpg,uploaded\nKitchen,k2.jpg,misplaced\n";
    let error = ManifestImporter::from_reader(csv.as_bytes(), request(None), Utc::now())
        .expect_err("status rejected");

    assert_eq!(
        error.to_string(),
        "row 2: unknown upload status 'misplaced'"
    );
    assert!(matches!(
        error,
        ManifestImportError::UnknownStatus { row: 2, .. }
    ));
}
