//! Prefix-sum sampling over a [`WeightTable`].
//!
//! The ticket pool is never materialized: ticket `k` belongs to the first team
//! whose running ticket total exceeds `k`.

use crate::entropy::SecureChoice;
use crate::weights::WeightTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSampler {
    cumulative: Vec<u64>,
}

impl TicketSampler {
    #[must_use]
    pub fn new(table: &WeightTable) -> Self {
        let cumulative = table
            .entries()
            .iter()
            .scan(0_u64, |running, entry| {
                *running += entry.tickets;
                Some(*running)
            })
            .collect();
        Self { cumulative }
    }

    #[must_use]
    pub fn total_tickets(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Index of the team holding `ticket`, or `None` when the ticket is
    /// outside the pool.
    #[must_use]
    pub fn team_for_ticket(&self, ticket: u64) -> Option<usize> {
        let index = self.cumulative.partition_point(|&upper| upper <= ticket);
        (index < self.cumulative.len()).then_some(index)
    }

    /// Draw one ticket from `source`, returning the ticket and its owner.
    pub fn draw<S>(&self, source: &mut S) -> (u64, Option<usize>)
    where
        S: SecureChoice + ?Sized,
    {
        let ticket = source.pick_ticket(self.total_tickets());
        (ticket, self.team_for_ticket(ticket))
    }
}
