use serde::{Deserialize, Serialize};

use crate::model::{Candidate, CandidateId, Tallies};

use super::{RandomSource, TicketPool, TicketRules};

/// How a pick was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    /// Only one candidate was eligible; no randomness was used.
    Singleton,
    /// Drawn in proportion to ticket weight.
    Weighted,
    /// Every active candidate was vetoed, so one was drawn uniformly from all of them.
    VetoFallback,
}

/// A drawn candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub candidate_id: CandidateId,
    pub kind: DrawKind,
}

/// The result of one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotteryOutcome {
    Picked(Pick),
    /// There were no active candidates to draw from.
    NoCandidates,
}

impl LotteryOutcome {
    fn picked(candidate: &Candidate, kind: DrawKind) -> Self {
        Self::Picked(Pick {
            candidate_id: candidate.id.clone(),
            kind,
        })
    }

    /// The chosen candidate, if any.
    pub fn candidate_id(&self) -> Option<&CandidateId> {
        match self {
            Self::Picked(pick) => Some(&pick.candidate_id),
            Self::NoCandidates => None,
        }
    }
}

/// The weighted, vetoable lottery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lottery {
    rules: TicketRules,
}

impl Lottery {
    pub fn new(rules: TicketRules) -> Self {
        Self { rules }
    }

    /// Work out every active candidate's ticket without drawing.
    pub fn pool<'a>(&self, candidates: &'a [Candidate], tallies: &Tallies) -> TicketPool<'a> {
        TicketPool::build(candidates, tallies, &self.rules)
    }

    /// Draw one candidate.
    ///
    /// Candidates are walked in the order given, which should be stable
    /// (e.g. creation order) for draws to be reproducible. At most one value
    /// is taken from `source`, and none at all when there is nothing to
    /// choose between.
    pub fn draw<R>(
        &self,
        candidates: &[Candidate],
        tallies: &Tallies,
        source: &mut R,
    ) -> LotteryOutcome
    where
        R: RandomSource + ?Sized,
    {
        let pool = self.pool(candidates, tallies);
        if pool.is_empty() {
            debug!("No active candidates, nothing to draw");
            return LotteryOutcome::NoCandidates;
        }

        let eligible: Vec<(&Candidate, u128)> = pool.eligible().collect();
        match eligible.as_slice() {
            [] => {
                let entries = pool.entries();
                warn!(
                    "All {} active candidates are vetoed, drawing uniformly among them",
                    entries.len()
                );
                let ticket = source.uniform_inclusive(1, entries.len() as u128);
                let index = (ticket.saturating_sub(1) as usize).min(entries.len() - 1);
                LotteryOutcome::picked(entries[index].candidate, DrawKind::VetoFallback)
            }
            [(only, _)] => {
                debug!("Only one eligible candidate: {}", only.id);
                LotteryOutcome::picked(only, DrawKind::Singleton)
            }
            _ => {
                let total = pool.total_weight();
                let ticket = source.uniform_inclusive(1, total);
                debug_assert!(
                    (1..=total).contains(&ticket),
                    "ticket {ticket} outside [1, {total}]"
                );
                debug!(
                    "Drawing ticket {ticket} of {total} among {} candidates",
                    eligible.len()
                );
                LotteryOutcome::picked(walk(&eligible, ticket), DrawKind::Weighted)
            }
        }
    }
}

/// Find the holder of `ticket` (1-based) by walking the entries in order.
/// `entries` must not be empty.
fn walk<'a>(entries: &[(&'a Candidate, u128)], mut ticket: u128) -> &'a Candidate {
    for &(candidate, weight) in entries {
        if ticket <= weight {
            return candidate;
        }
        ticket -= weight;
    }
    // Tickets never exceed the total; see the assertion in `draw`.
    entries[entries.len() - 1].0
}

/// Draw with the default ticket rules.
pub fn draw_pick<R>(candidates: &[Candidate], tallies: &Tallies, source: &mut R) -> LotteryOutcome
where
    R: RandomSource + ?Sized,
{
    Lottery::default().draw(candidates, tallies, source)
}
