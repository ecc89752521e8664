mod candidate;
mod preference;
mod snapshot;
mod tally;

pub use candidate::{Candidate, CandidateId};
pub use preference::{Preference, UserId, UserVotes, VoteRecord};
pub use snapshot::ClubSnapshot;
pub use tally::{aggregate_tallies, PreferenceTally, Tallies};
