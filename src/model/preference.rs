use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::CandidateId;

/// Opaque participant identifier.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A participant's private preference for one candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum Preference {
    /// "Want this."
    MostWanted = 1,
    /// "Could do this."
    SomewhatWanted = 2,
    /// "Not this round." A single one vetoes the candidate.
    NotThisRound = 3,
}

impl Preference {
    /// Numeric preference level; lower is more wanted.
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl Display for Preference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MostWanted => "want this",
            Self::SomewhatWanted => "could do this",
            Self::NotThisRound => "not this round",
        };
        write!(f, "{text}")
    }
}

/// One raw vote row, as held by the vote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub user_id: UserId,
    pub candidate_id: CandidateId,
    pub preference: Preference,
}

impl VoteRecord {
    pub fn new(
        user_id: impl Into<UserId>,
        candidate_id: impl Into<CandidateId>,
        preference: Preference,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            candidate_id: candidate_id.into(),
            preference,
        }
    }
}

/// A single participant's own votes. This is the only vote data the personal
/// ranking sees; other participants' votes never enter it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserVotes {
    votes: HashMap<CandidateId, Preference>,
}

impl UserVotes {
    /// Extract one participant's votes from the raw records. Later records
    /// for the same candidate replace earlier ones.
    pub fn for_user<'a>(user: &UserId, records: impl IntoIterator<Item = &'a VoteRecord>) -> Self {
        let mut votes = Self::default();
        for record in records.into_iter().filter(|record| &record.user_id == user) {
            votes.set(record.candidate_id.clone(), record.preference);
        }
        votes
    }

    /// Record or replace a vote.
    pub fn set(&mut self, candidate_id: CandidateId, preference: Preference) {
        self.votes.insert(candidate_id, preference);
    }

    pub fn get(&self, candidate_id: &CandidateId) -> Option<Preference> {
        self.votes.get(candidate_id).copied()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

impl FromIterator<(CandidateId, Preference)> for UserVotes {
    fn from_iter<T: IntoIterator<Item = (CandidateId, Preference)>>(iter: T) -> Self {
        Self {
            votes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_serializes_as_level() {
        assert_eq!(serde_json::to_string(&Preference::MostWanted).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<Preference>("3").unwrap(),
            Preference::NotThisRound
        );
        serde_json::from_str::<Preference>("4").unwrap_err();
        assert!(Preference::MostWanted < Preference::SomewhatWanted);
        assert_eq!(Preference::SomewhatWanted.level(), 2);
    }

    #[test]
    fn user_votes_only_hold_own_records() {
        let records = vec![
            VoteRecord::new("alice", "blue", Preference::MostWanted),
            VoteRecord::new("bob", "blue", Preference::NotThisRound),
            VoteRecord::new("alice", "nevermind", Preference::SomewhatWanted),
            VoteRecord::new("alice", "blue", Preference::SomewhatWanted),
        ];
        let votes = UserVotes::for_user(&"alice".into(), &records);
        assert_eq!(votes.len(), 2);
        assert_eq!(votes.get(&"blue".into()), Some(Preference::SomewhatWanted));
        assert_eq!(
            votes.get(&"nevermind".into()),
            Some(Preference::SomewhatWanted)
        );

        let mut votes = UserVotes::for_user(&"carol".into(), &records);
        assert!(votes.is_empty());
        votes.set("blue".into(), Preference::MostWanted);
        assert_eq!(votes.get(&"blue".into()), Some(Preference::MostWanted));
    }
}
