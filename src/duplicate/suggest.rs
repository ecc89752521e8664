use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::labels;

use super::levenshtein;

/// Limits for near-duplicate suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRules {
    /// Largest edit distance still worth suggesting.
    pub max_distance: usize,
    /// Maximum number of suggestions returned.
    pub limit: usize,
}

impl Default for SuggestionRules {
    fn default() -> Self {
        Self {
            max_distance: 2,
            limit: 5,
        }
    }
}

/// An existing label close to the input, with its edit distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityMatch {
    pub label: String,
    pub distance: usize,
}

impl SuggestionRules {
    /// Existing labels within `max_distance` of `input` after normalisation,
    /// closest first, ties in lexicographic order of the existing label.
    /// Identical existing labels are only suggested once.
    pub fn suggest<S: AsRef<str>>(&self, input: &str, existing: &[S]) -> Vec<SimilarityMatch> {
        if labels::is_blank(input) || self.limit == 0 {
            return Vec::new();
        }
        let input = labels::normalize(input);

        let mut seen = HashSet::new();
        let mut matches: Vec<SimilarityMatch> = existing
            .iter()
            .map(AsRef::as_ref)
            .filter(|label| seen.insert(*label))
            .filter_map(|label| {
                let distance = levenshtein(&input, &labels::normalize(label));
                (distance <= self.max_distance).then(|| SimilarityMatch {
                    label: label.to_string(),
                    distance,
                })
            })
            .collect();

        matches.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.label.cmp(&b.label)));
        matches.truncate(self.limit);
        matches
    }
}

/// Near-duplicate suggestions with the default limits: distance at most 2,
/// at most 5 results.
pub fn compute_suggestions<S: AsRef<str>>(input: &str, existing: &[S]) -> Vec<SimilarityMatch> {
    SuggestionRules::default().suggest(input, existing)
}
