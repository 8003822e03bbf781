use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One manifest line, still in raw text form.
#[derive(Debug)]
pub(crate) struct ManifestRecord {
    /// 1-based data row number, excluding the header.
    pub(crate) row: usize,
    pub(crate) category: String,
    pub(crate) file: String,
    pub(crate) status: Option<String>,
    /// Raw `Captured At` text; blank cells are `None`.
    pub(crate) captured_at: Option<String>,
    pub(crate) remote_ref: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) progress: Option<u8>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ManifestRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<ManifestRow>().enumerate() {
        let row = record?;
        records.push(ManifestRecord {
            row: index + 1,
            captured_at: row.captured_at,
            category: row.category,
            file: row.file,
            status: row.status,
            remote_ref: row.remote_ref,
            error: row.error,
            progress: row.progress,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        rename = "Captured At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    captured_at: Option<String>,
    #[serde(
        rename = "Remote Ref",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    remote_ref: Option<String>,
    #[serde(rename = "Error", default, deserialize_with = "empty_string_as_none")]
    error: Option<String>,
    #[serde(rename = "Progress", default)]
    progress: Option<u8>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
