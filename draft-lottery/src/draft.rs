//! The draft lottery draw loop.
//!
//! Tickets are drawn with replacement until every team has been drawn at
//! least once. Teams are placed in the order their first ticket comes up;
//! later tickets for an already-placed team still count as draws.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entropy::{SecureChoice, os_entropy};
use crate::sampler::TicketSampler;
use crate::weights::{WeightTable, WeightTableError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] WeightTableError),
    #[error("draw limit of {limit} reached with {placed} of {teams} teams placed")]
    DrawLimitExceeded {
        limit: u64,
        placed: usize,
        teams: usize,
    },
    #[error("random source returned ticket {ticket} outside a pool of {total}")]
    TicketOutOfRange { ticket: u64, total: u64 },
}

/// Optional bound on how many draws a single lottery may take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawLimits {
    pub max_draws: Option<u64>,
}

impl DrawLimits {
    pub const UNBOUNDED: Self = Self { max_draws: None };

    #[must_use]
    pub const fn capped(max_draws: u64) -> Self {
        Self {
            max_draws: Some(max_draws),
        }
    }

    const fn exhausted(self, draws: u64) -> bool {
        match self.max_draws {
            Some(limit) => draws >= limit,
            None => false,
        }
    }
}

/// One ticket pulled from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawRecord {
    pub team: String,
    /// Zero-based draft slot this draw awarded, or `None` for a repeat.
    pub slot: Option<usize>,
}

/// Completed draft order and the draws it took to produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftOutcome {
    pub order: Vec<String>,
    pub draw_count: u64,
    pub trace: Vec<DrawRecord>,
}

impl DraftOutcome {
    /// Draws that landed on a team already placed.
    #[must_use]
    pub fn repeat_draws(&self) -> u64 {
        let placed = u64::try_from(self.order.len()).unwrap_or(u64::MAX);
        self.draw_count.saturating_sub(placed)
    }

    /// One-based draft slot for `team`.
    #[must_use]
    pub fn pick_of(&self, team: &str) -> Option<usize> {
        self.order
            .iter()
            .position(|placed| placed == team)
            .map(|index| index + 1)
    }
}

/// Team indices in draft order plus draw bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrawRun {
    pub slots: Vec<usize>,
    pub draw_count: u64,
    /// `(team, slot)` per draw; `slot` is `None` for a repeat.
    pub trace: Vec<(usize, Option<usize>)>,
}

pub(crate) fn run_draws<S>(
    sampler: &TicketSampler,
    source: &mut S,
    limits: DrawLimits,
    record_trace: bool,
) -> Result<DrawRun, DraftError>
where
    S: SecureChoice + ?Sized,
{
    let teams = sampler.len();
    let mut placed = vec![false; teams];
    let mut slots = Vec::with_capacity(teams);
    let mut trace = Vec::new();
    let mut draw_count: u64 = 0;

    while slots.len() < teams {
        if limits.exhausted(draw_count) {
            return Err(DraftError::DrawLimitExceeded {
                limit: limits.max_draws.unwrap_or(draw_count),
                placed: slots.len(),
                teams,
            });
        }
        let (ticket, owner) = sampler.draw(source);
        let team = owner.ok_or(DraftError::TicketOutOfRange {
            ticket,
            total: sampler.total_tickets(),
        })?;
        draw_count += 1;
        let slot = if placed[team] {
            None
        } else {
            placed[team] = true;
            slots.push(team);
            Some(slots.len() - 1)
        };
        if record_trace {
            trace.push((team, slot));
        }
    }

    Ok(DrawRun {
        slots,
        draw_count,
        trace,
    })
}

/// Run the lottery for `table` with no draw cap.
///
/// # Errors
///
/// Returns [`DraftError::TicketOutOfRange`] if `source` breaks its contract.
pub fn draft_order<S>(table: &WeightTable, source: &mut S) -> Result<DraftOutcome, DraftError>
where
    S: SecureChoice + ?Sized,
{
    draft_order_with_limits(table, source, DrawLimits::UNBOUNDED)
}

/// Run the lottery for `table`, stopping early if `limits` is exhausted.
///
/// # Errors
///
/// Returns [`DraftError::DrawLimitExceeded`] when the cap is reached before
/// every team is placed, or [`DraftError::TicketOutOfRange`] if `source`
/// breaks its contract.
pub fn draft_order_with_limits<S>(
    table: &WeightTable,
    source: &mut S,
    limits: DrawLimits,
) -> Result<DraftOutcome, DraftError>
where
    S: SecureChoice + ?Sized,
{
    let sampler = TicketSampler::new(table);
    let run = run_draws(&sampler, source, limits, true)?;

    let trace = run
        .trace
        .iter()
        .map(|&(team, slot)| DrawRecord {
            team: team_name(table, team),
            slot,
        })
        .collect();
    let order = run
        .slots
        .iter()
        .map(|&team| team_name(table, team))
        .collect();

    log::debug!(
        "draft complete: {} teams placed in {} draws",
        table.len(),
        run.draw_count
    );

    Ok(DraftOutcome {
        order,
        draw_count: run.draw_count,
        trace,
    })
}

/// Validate raw `(team, weight)` pairs and draw a full order from OS entropy.
///
/// # Errors
///
/// Returns [`DraftError::InvalidInput`] if the weights are empty, contain a
/// blank or duplicate team, or a non-positive weight.
pub fn compute_draft_order<I, S>(weights: I) -> Result<DraftOutcome, DraftError>
where
    I: IntoIterator<Item = (S, i64)>,
    S: Into<String>,
{
    let table = WeightTable::new(weights)?;
    draft_order(&table, &mut os_entropy())
}

fn team_name(table: &WeightTable, index: usize) -> String {
    table
        .get(index)
        .map(|entry| entry.team.clone())
        .unwrap_or_default()
}
