use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ranking::creation_order;

use super::{aggregate_tallies, Candidate, Tallies, UserId, UserVotes, VoteRecord};

/// A point-in-time export of a club: its candidates and either pre-aggregated
/// tallies, raw votes, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSnapshot {
    pub candidates: Vec<Candidate>,
    /// Aggregated tallies. When absent they are computed from `votes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tallies: Option<Tallies>,
    /// Raw per-user votes.
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}

impl ClubSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let snapshot: Self = serde_json::from_reader(file)?;
        info!(
            "Loaded {} candidates and {} votes from {}",
            snapshot.candidates.len(),
            snapshot.votes.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Active candidates, oldest first.
    pub fn active_candidates(&self) -> Vec<Candidate> {
        creation_order(&self.candidates)
            .into_iter()
            .filter(|candidate| candidate.active)
            .cloned()
            .collect()
    }

    /// The supplied tallies, or ones aggregated from the raw votes.
    pub fn effective_tallies(&self) -> Tallies {
        match &self.tallies {
            Some(tallies) => tallies.clone(),
            None => aggregate_tallies(&self.votes),
        }
    }

    /// One participant's own votes.
    pub fn user_votes(&self, user: &UserId) -> UserVotes {
        UserVotes::for_user(user, &self.votes)
    }

    /// Has this participant voted at all?
    pub fn has_voter(&self, user: &UserId) -> bool {
        self.votes.iter().any(|record| &record.user_id == user)
    }
}


#[cfg(test)]
mod tests {
    use crate::model::{CandidateId, Preference, PreferenceTally};

    use super::*;

    #[test]
    fn active_in_creation_order() {
        let ids: Vec<String> = ClubSnapshot::example()
            .active_candidates()
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["blue", "nevermind", "abbey-road"]);
    }

    #[test]
    fn tallies_aggregated_when_missing() {
        let mut snapshot = ClubSnapshot::example();
        let tallies = snapshot.effective_tallies();
        assert_eq!(
            tallies[&CandidateId::from("blue")],
            PreferenceTally::new(1, 1, 0)
        );
        assert!(tallies[&CandidateId::from("nevermind")].is_vetoed());

        let supplied = Tallies::from([(CandidateId::from("blue"), PreferenceTally::new(0, 0, 9))]);
        snapshot.tallies = Some(supplied.clone());
        assert_eq!(snapshot.effective_tallies(), supplied);
    }

    #[test]
    fn user_votes() {
        let snapshot = ClubSnapshot::example();
        let bob = snapshot.user_votes(&"bob".into());
        assert_eq!(bob.len(), 2);
        assert_eq!(
            bob.get(&"nevermind".into()),
            Some(Preference::NotThisRound)
        );
        assert!(snapshot.has_voter(&"carol".into()));
        assert!(!snapshot.has_voter(&"dave".into()));
    }

    fn fixture(name: &str) -> String {
        format!("{}/example_snapshots/{name}", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn load_example_files() {
        let snapshot = ClubSnapshot::load(fixture("club.json")).unwrap();
        assert_eq!(snapshot.candidates.len(), 5);
        assert_eq!(snapshot.active_candidates().len(), 4);
        assert!(snapshot.tallies.is_none());

        let snapshot = ClubSnapshot::load(fixture("all_vetoed.json")).unwrap();
        assert!(snapshot.tallies.is_some());
        assert!(snapshot.votes.is_empty());

        ClubSnapshot::load(fixture("does_not_exist.json")).unwrap_err();
        ClubSnapshot::load(fixture("malformed.json")).unwrap_err();
    }
}
