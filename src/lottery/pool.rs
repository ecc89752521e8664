use serde::{Deserialize, Serialize};

use crate::model::{Candidate, PreferenceTally, Tallies};

/// Ticket multipliers for each kind of positive vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRules {
    /// Tickets per "want this" vote.
    pub most_wanted_weight: u32,
    /// Tickets per "could do this" vote.
    pub somewhat_wanted_weight: u32,
}

impl Default for TicketRules {
    fn default() -> Self {
        Self {
            most_wanted_weight: 5,
            somewhat_wanted_weight: 3,
        }
    }
}

impl TicketRules {
    /// Work out a candidate's ticket from its tally. A missing tally counts as
    /// no votes at all. Unvetoed candidates always hold at least one ticket.
    pub fn ticket(&self, tally: Option<&PreferenceTally>) -> Ticket {
        let tally = tally.copied().unwrap_or_default();
        if tally.is_vetoed() {
            return Ticket::Vetoed;
        }
        // Both products fit in 64 bits, so the sum is exact in 128.
        let weight = u128::from(self.most_wanted_weight) * u128::from(tally.most_wanted)
            + u128::from(self.somewhat_wanted_weight) * u128::from(tally.somewhat_wanted);
        Ticket::Weight(weight.max(1))
    }
}

/// A candidate's standing in the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ticket {
    /// At least one veto; out of the pool.
    Vetoed,
    /// In the pool with this many tickets (never zero).
    Weight(u128),
}

impl Ticket {
    /// Tickets held; vetoed candidates hold none.
    pub fn weight(&self) -> u128 {
        match self {
            Self::Vetoed => 0,
            Self::Weight(weight) => *weight,
        }
    }
}

/// One active candidate and its ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry<'a> {
    pub candidate: &'a Candidate,
    pub ticket: Ticket,
}

/// Every active candidate with its ticket, in the order supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPool<'a> {
    entries: Vec<PoolEntry<'a>>,
}

impl<'a> TicketPool<'a> {
    /// Build the pool, skipping archived candidates.
    pub fn build(candidates: &'a [Candidate], tallies: &Tallies, rules: &TicketRules) -> Self {
        let entries = candidates
            .iter()
            .filter(|candidate| candidate.active)
            .map(|candidate| PoolEntry {
                candidate,
                ticket: rules.ticket(tallies.get(&candidate.id)),
            })
            .collect();
        Self { entries }
    }

    /// All active candidates, vetoed or not.
    pub fn entries(&self) -> &[PoolEntry<'a>] {
        &self.entries
    }

    /// Unvetoed candidates and their weights.
    pub fn eligible(&self) -> impl Iterator<Item = (&'a Candidate, u128)> + '_ {
        self.entries.iter().filter_map(|entry| match entry.ticket {
            Ticket::Vetoed => None,
            Ticket::Weight(weight) => Some((entry.candidate, weight)),
        })
    }

    /// Are there no active candidates at all?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is there at least one active candidate, and every one of them vetoed?
    pub fn all_vetoed(&self) -> bool {
        !self.is_empty() && self.eligible().next().is_none()
    }

    /// Total tickets among unvetoed candidates. Each weight is below 2^65,
    /// so the sum is exact for any pool that fits in memory.
    pub fn total_weight(&self) -> u128 {
        self.eligible().map(|(_, weight)| weight).sum()
    }

    /// Each active candidate's chance of being drawn. When everything is
    /// vetoed every candidate gets an equal share.
    pub fn odds(&self) -> Vec<(&'a Candidate, f64)> {
        if self.all_vetoed() {
            let share = 1.0 / self.entries.len() as f64;
            return self
                .entries
                .iter()
                .map(|entry| (entry.candidate, share))
                .collect();
        }
        let total = self.total_weight() as f64;
        self.entries
            .iter()
            .map(|entry| (entry.candidate, entry.ticket.weight() as f64 / total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn ticket_weights() {
        let rules = TicketRules::default();
        assert_eq!(rules.ticket(None), Ticket::Weight(1));
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::default())),
            Ticket::Weight(1)
        );
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(1, 0, 0))),
            Ticket::Weight(5)
        );
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(0, 1, 0))),
            Ticket::Weight(3)
        );
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(2, 3, 0))),
            Ticket::Weight(19)
        );
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(9, 9, 1))),
            Ticket::Vetoed
        );
        assert_eq!(Ticket::Vetoed.weight(), 0);
    }

    #[test]
    fn custom_rules() {
        let rules = TicketRules {
            most_wanted_weight: 2,
            somewhat_wanted_weight: 0,
        };
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(3, 4, 0))),
            Ticket::Weight(6)
        );
        assert_eq!(
            rules.ticket(Some(&PreferenceTally::new(0, 4, 0))),
            Ticket::Weight(1)
        );
    }

    #[test]
    fn largest_rules_stay_exact() {
        let rules = TicketRules {
            most_wanted_weight: u32::MAX,
            somewhat_wanted_weight: u32::MAX,
        };
        let max = u128::from(u32::MAX);
        let tally = PreferenceTally::new(u32::MAX, u32::MAX, 0);
        assert_eq!(rules.ticket(Some(&tally)), Ticket::Weight(2 * max * max));

        let candidates = vec![Candidate::blue(), Candidate::nevermind()];
        let tallies = HashMap::from([
            (Candidate::blue().id, tally),
            (Candidate::nevermind().id, tally),
        ]);
        let pool = TicketPool::build(&candidates, &tallies, &rules);
        assert_eq!(pool.total_weight(), 4 * max * max);
        let odds: Vec<f64> = pool.odds().into_iter().map(|(_, p)| p).collect();
        assert_eq!(odds, vec![0.5, 0.5]);
    }

    #[test]
    fn pool_skips_archived_and_keeps_order() {
        let candidates = vec![
            Candidate::blue(),
            Candidate::nevermind().archived(),
            Candidate::abbey_road(),
        ];
        let tallies = HashMap::from([(Candidate::blue().id, PreferenceTally::new(1, 1, 0))]);
        let pool = TicketPool::build(&candidates, &tallies, &TicketRules::default());

        assert_eq!(pool.len(), 2);
        let eligible: Vec<_> = pool.eligible().map(|(c, w)| (c.id.clone(), w)).collect();
        assert_eq!(
            eligible,
            vec![(Candidate::blue().id, 8), (Candidate::abbey_road().id, 1)]
        );
        assert_eq!(pool.total_weight(), 9);
        assert!(!pool.all_vetoed());
    }

    #[test]
    fn odds() {
        let candidates = vec![
            Candidate::blue(),
            Candidate::nevermind(),
            Candidate::abbey_road(),
        ];
        let tallies = HashMap::from([
            (Candidate::blue().id, PreferenceTally::new(1, 0, 0)),
            (Candidate::nevermind().id, PreferenceTally::new(0, 1, 0)),
        ]);
        let pool = TicketPool::build(&candidates, &tallies, &TicketRules::default());
        let odds: Vec<f64> = pool.odds().into_iter().map(|(_, p)| p).collect();
        assert_eq!(odds, vec![5.0 / 9.0, 3.0 / 9.0, 1.0 / 9.0]);

        let vetoed = HashMap::from([
            (Candidate::blue().id, PreferenceTally::new(4, 0, 1)),
            (Candidate::nevermind().id, PreferenceTally::new(0, 0, 3)),
            (Candidate::abbey_road().id, PreferenceTally::new(0, 2, 1)),
        ]);
        let pool = TicketPool::build(&candidates, &vetoed, &TicketRules::default());
        assert!(pool.all_vetoed());
        assert_eq!(pool.total_weight(), 0);
        let odds: Vec<f64> = pool.odds().into_iter().map(|(_, p)| p).collect();
        assert_eq!(odds, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn empty_pool() {
        let pool = TicketPool::build(&[], &HashMap::new(), &TicketRules::default());
        assert!(pool.is_empty());
        assert!(!pool.all_vetoed());
        assert!(pool.odds().is_empty());
    }
}
