//! Duplicate detection for newly proposed candidates.
//!
//! An exact duplicate (same title and artist, ignoring case and spacing) is
//! rejected by the caller. Near duplicates are only advisory: they feed a
//! "did you mean" prompt and never block admission.

mod distance;
mod exact;
mod suggest;

use serde::Serialize;

use crate::model::{Candidate, CandidateId};

pub use distance::levenshtein;
pub use exact::{find_exact_duplicate, is_exact_duplicate};
pub use suggest::{compute_suggestions, SimilarityMatch, SuggestionRules};

/// Everything worth telling a user who is about to add a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionCheck {
    /// The active candidate this would exactly duplicate.
    pub exact_duplicate: Option<CandidateId>,
    /// Active titles close to the proposed title.
    pub similar_primary: Vec<SimilarityMatch>,
    /// Active artists close to the proposed artist.
    pub similar_secondary: Vec<SimilarityMatch>,
}

impl AdmissionCheck {
    /// Should the candidate be refused outright?
    pub fn is_duplicate(&self) -> bool {
        self.exact_duplicate.is_some()
    }

    /// Is there anything to ask the user about before admitting it?
    pub fn needs_confirmation(&self) -> bool {
        !self.similar_primary.is_empty() || !self.similar_secondary.is_empty()
    }
}

/// Check a proposed `(primary, secondary)` pair against the active candidates.
/// Titles and artists are compared independently.
pub fn check_admission(
    primary: &str,
    secondary: &str,
    candidates: &[Candidate],
    rules: &SuggestionRules,
) -> AdmissionCheck {
    let active: Vec<&Candidate> = candidates.iter().filter(|c| c.active).collect();
    let primaries: Vec<&str> = active.iter().map(|c| c.primary_label.as_str()).collect();
    let secondaries: Vec<&str> = active.iter().map(|c| c.secondary_label.as_str()).collect();

    let check = AdmissionCheck {
        exact_duplicate: find_exact_duplicate(primary, secondary, candidates)
            .map(|candidate| candidate.id.clone()),
        similar_primary: rules.suggest(primary, &primaries),
        similar_secondary: rules.suggest(secondary, &secondaries),
    };
    debug!(
        "Admission check for {primary:?} / {secondary:?}: \
        duplicate={}, {} similar titles, {} similar artists",
        check.is_duplicate(),
        check.similar_primary.len(),
        check.similar_secondary.len()
    );
    check
}
