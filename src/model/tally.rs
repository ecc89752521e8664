use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{CandidateId, Preference, UserId, VoteRecord};

/// Aggregated tallies, keyed by candidate.
pub type Tallies = HashMap<CandidateId, PreferenceTally>;

/// Aggregated vote counts for one candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceTally {
    /// Voters who marked "want this".
    #[serde(default)]
    pub most_wanted: u32,
    /// Voters who marked "could do this".
    #[serde(default)]
    pub somewhat_wanted: u32,
    /// Voters who marked "not this round".
    #[serde(default)]
    pub vetoed: u32,
}

impl PreferenceTally {
    pub fn new(most_wanted: u32, somewhat_wanted: u32, vetoed: u32) -> Self {
        Self {
            most_wanted,
            somewhat_wanted,
            vetoed,
        }
    }

    /// A single veto excludes the candidate, whatever else it received.
    pub fn is_vetoed(&self) -> bool {
        self.vetoed > 0
    }

    /// Count one more vote.
    pub fn record(&mut self, preference: Preference) {
        let count = match preference {
            Preference::MostWanted => &mut self.most_wanted,
            Preference::SomewhatWanted => &mut self.somewhat_wanted,
            Preference::NotThisRound => &mut self.vetoed,
        };
        *count = count.saturating_add(1);
    }
}

/// Reduce raw per-user vote rows into per-candidate tallies.
///
/// Each user holds at most one vote per candidate; when a user has several
/// rows for the same candidate, the last one wins. Candidates with no votes
/// get no entry.
pub fn aggregate_tallies<'a>(records: impl IntoIterator<Item = &'a VoteRecord>) -> Tallies {
    let mut latest: HashMap<(&UserId, &CandidateId), Preference> = HashMap::new();
    for record in records {
        latest.insert((&record.user_id, &record.candidate_id), record.preference);
    }

    let mut tallies = Tallies::new();
    for ((_, candidate_id), preference) in latest {
        tallies
            .entry(candidate_id.clone())
            .or_default()
            .record(preference);
    }
    trace!("Aggregated votes into {} tallies", tallies.len());
    tallies
}
