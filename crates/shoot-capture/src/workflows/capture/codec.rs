use serde::{Deserialize, Serialize};
use tracing::debug;

use super::session::{ShootSession, StoredSession};

/// Envelope version written by [`serialize_session`].
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("session payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported session envelope version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    session: &'a ShootSession,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    session: StoredSession,
}

/// Encode a session as JSON; timestamps are written as RFC 3339 UTC.
pub fn serialize_session(session: &ShootSession) -> Result<String, CodecError> {
    let envelope = EnvelopeRef {
        version: ENVELOPE_VERSION,
        session,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a payload, reporting why it was rejected.
pub fn try_deserialize_session(raw: &str) -> Result<ShootSession, CodecError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.version != ENVELOPE_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: envelope.version,
            expected: ENVELOPE_VERSION,
        });
    }

    Ok(envelope.session.into_session())
}

/// Decode a payload, treating anything unreadable as "no saved session".
pub fn deserialize_session(raw: &str) -> Option<ShootSession> {
    match try_deserialize_session(raw) {
        Ok(session) => Some(session),
        Err(err) => {
            debug!(error = %err, "discarding unreadable session payload");
            None
        }
    }
}
