//! Shot tracking, progress derivation and completion gating for a single
//! listing capture session.

pub mod catalog;
pub mod codec;
pub mod domain;
mod lifecycle;
pub mod progress;
pub mod recommendation;
pub mod router;
pub mod service;
mod session;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{catalog, category, find_category, required_categories, ShotCategory};
pub use codec::{deserialize_session, serialize_session, try_deserialize_session, CodecError};
pub use domain::{
    CategoryId, SessionId, SessionStatus, Shot, ShotCategoryProgress, ShotId, ShotMetadata,
    ShotStatus, ShotUpdate,
};
pub use progress::{calculate_progress, CategoryProgressEntry, SessionProgress};
pub use recommendation::recommend_next_category;
pub use router::capture_router;
pub use service::{CaptureServiceError, CaptureSessionService};
pub use session::{required_photos, NewSession, ShootSession};
pub use store::{InMemorySessionStore, SessionStore, StoreError};
pub use validation::{
    validate_completion, ValidationError, ValidationReport, ValidationView, ValidationWarning,
};
