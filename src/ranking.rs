//! Orderings over the candidate list.

use std::cmp::Ordering;

use crate::model::{Candidate, Preference, UserVotes};

/// Sort key for candidates the user hasn't voted on; after every real preference level.
const UNVOTED: u8 = Preference::NotThisRound as u8 + 1;

/// Order active candidates for one user: "want this" first, then "could do
/// this", then "not this round", then anything the user hasn't voted on.
/// Ties go by title, then artist, compared exactly as typed.
///
/// Only the user's own votes are consulted, never anyone else's or the
/// aggregated tallies.
pub fn personal_ranking<'a>(
    candidates: &'a [Candidate],
    my_votes: &UserVotes,
) -> Vec<&'a Candidate> {
    let level = |candidate: &Candidate| {
        my_votes
            .get(&candidate.id)
            .map(Preference::level)
            .unwrap_or(UNVOTED)
    };

    let mut ranked: Vec<&Candidate> = candidates.iter().filter(|c| c.active).collect();
    ranked.sort_by(|a, b| level(*a).cmp(&level(*b)).then_with(|| by_labels(a, b)));
    ranked
}

/// The stable order the lottery walks: oldest first, ties by ID.
pub fn creation_order(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    ordered
}

fn by_labels(a: &Candidate, b: &Candidate) -> Ordering {
    a.primary_label
        .cmp(&b.primary_label)
        .then_with(|| a.secondary_label.cmp(&b.secondary_label))
}
