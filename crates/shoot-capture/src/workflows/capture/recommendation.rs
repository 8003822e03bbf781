use super::catalog::{catalog, ShotCategory};
use super::session::ShootSession;

/// Next category the capturer should shoot, or `None` once every category is covered.
///
/// Incomplete required categories come first, then optional categories without
/// any shot. Ties resolve by catalog order.
pub fn recommend_next_category(session: &ShootSession) -> Option<&'static ShotCategory> {
    let required_gap = catalog().iter().find(|entry| {
        entry.required
            && !session
                .progress_for(entry.id)
                .is_some_and(|progress| progress.is_complete)
    });

    required_gap.or_else(|| {
        catalog().iter().find(|entry| {
            !entry.required
                && session
                    .progress_for(entry.id)
                    .map_or(true, |progress| progress.shot_count == 0)
        })
    })
}
