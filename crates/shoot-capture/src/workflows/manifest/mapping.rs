use crate::workflows::capture::catalog::{catalog, ShotCategory};
use crate::workflows::capture::domain::ShotStatus;

/// Match a manifest category against catalog ids or display names.
///
/// Comparison ignores case, punctuation and spacing, so `"Front Exterior"`,
/// `"exterior-front"` and `"EXTERIOR_FRONT"` all resolve.
pub(crate) fn category_for(raw: &str) -> Option<&'static ShotCategory> {
    let needle = normalize(raw);
    if needle.is_empty() {
        return None;
    }

    catalog()
        .iter()
        .find(|entry| normalize(entry.id.as_str()) == needle || normalize(entry.label) == needle)
}

pub(crate) fn status_for(raw: &str) -> Option<ShotStatus> {
    match normalize(raw).as_str() {
        "pending" | "queued" => Some(ShotStatus::Pending),
        "uploading" | "inprogress" => Some(ShotStatus::Uploading),
        "uploaded" | "done" | "complete" => Some(ShotStatus::Uploaded),
        "failed" | "error" => Some(ShotStatus::Failed),
        _ => None,
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
