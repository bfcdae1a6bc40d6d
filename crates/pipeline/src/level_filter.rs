//! Hard filter on the predicted credit level.

use crate::candidate::RankedCandidate;
use catalog::CreditLevel;
use tracing::debug;

/// Keep only candidates whose predicted level matches `preferred`.
///
/// With no preference this is the identity function. Otherwise it is a
/// hard filter, not a re-ranking: candidates outside the requested level
/// are dropped entirely, even if nothing remains. Candidates are never
/// added, reordered, or modified.
pub fn filter_by_level(
    candidates: Vec<RankedCandidate>,
    preferred: Option<CreditLevel>,
) -> Vec<RankedCandidate> {
    let Some(level) = preferred else {
        return candidates;
    };

    let before = candidates.len();
    let kept: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter(|candidate| candidate.credit_level_or_default() == level)
        .collect();

    debug!(
        "Level filter ({}) kept {} of {} candidates",
        level,
        kept.len(),
        before
    );
    kept
}
