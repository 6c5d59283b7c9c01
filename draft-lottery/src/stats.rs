//! Repeated-trial statistics for a lottery table.
//!
//! Runs the lottery many times against one table and aggregates where each
//! team lands. The first pick of every run is a single weighted draw, so its
//! empirical frequency should track each team's ticket share.

use serde::Serialize;

use crate::draft::{DraftError, DrawLimits, run_draws};
use crate::entropy::SecureChoice;
use crate::numbers::{ratio, u64_to_f64};
use crate::sampler::TicketSampler;
use crate::weights::WeightTable;

/// Per-team aggregate across all trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamTrialStats {
    pub team: String,
    pub tickets: u64,
    pub expected_first_pick: f64,
    pub first_picks: u64,
    pub first_pick_rate: f64,
    /// Mean one-based draft slot.
    pub mean_slot: f64,
    /// `slot_counts[k]` counts runs where the team drew slot `k + 1`.
    pub slot_counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    pub trials: u64,
    pub total_tickets: u64,
    pub teams: Vec<TeamTrialStats>,
    pub mean_draws: f64,
    pub std_draws: f64,
    pub min_draws: u64,
    pub max_draws: u64,
}

impl TrialSummary {
    /// Largest absolute gap between observed and expected first-pick rates.
    #[must_use]
    pub fn max_first_pick_deviation(&self) -> f64 {
        self.teams
            .iter()
            .map(|team| (team.first_pick_rate - team.expected_first_pick).abs())
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn team(&self, name: &str) -> Option<&TeamTrialStats> {
        self.teams.iter().find(|team| team.team == name)
    }
}

/// Run `trials` independent lotteries over `table`.
///
/// Zero trials yields a summary with every count at zero.
///
/// # Errors
///
/// Propagates the first [`DraftError`] raised by any run.
pub fn simulate_trials<S>(
    table: &WeightTable,
    trials: u64,
    source: &mut S,
    limits: DrawLimits,
) -> Result<TrialSummary, DraftError>
where
    S: SecureChoice + ?Sized,
{
    let sampler = TicketSampler::new(table);
    let teams = table.len();
    let mut slot_counts = vec![vec![0_u64; teams]; teams];
    let mut draws = RunningStats::default();

    for trial in 0..trials {
        let run = run_draws(&sampler, source, limits, false)?;
        for (slot, &team) in run.slots.iter().enumerate() {
            slot_counts[team][slot] += 1;
        }
        draws.add(run.draw_count);
        if trial > 0 && trial % 10_000 == 0 {
            log::debug!("completed {trial} of {trials} trials");
        }
    }

    let team_stats = table
        .entries()
        .iter()
        .zip(slot_counts)
        .map(|(entry, counts)| {
            let first_picks = counts.first().copied().unwrap_or(0);
            let weighted_slots: u64 = counts
                .iter()
                .zip(1_u64..)
                .map(|(&count, slot)| count * slot)
                .sum();
            TeamTrialStats {
                team: entry.team.clone(),
                tickets: entry.tickets,
                expected_first_pick: ratio(entry.tickets, table.total_tickets()),
                first_picks,
                first_pick_rate: ratio(first_picks, trials),
                mean_slot: ratio(weighted_slots, trials),
                slot_counts: counts,
            }
        })
        .collect();

    log::info!(
        "{trials} trials complete: mean {:.2} draws, max {}",
        draws.mean(),
        draws.max
    );

    Ok(TrialSummary {
        trials,
        total_tickets: table.total_tickets(),
        teams: team_stats,
        mean_draws: draws.mean(),
        std_draws: draws.std_dev(),
        min_draws: draws.min.unwrap_or(0),
        max_draws: draws.max,
    })
}

#[derive(Debug, Default)]
struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: Option<u64>,
    max: u64,
}

impl RunningStats {
    fn add(&mut self, value: u64) {
        self.count += 1;
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = self.max.max(value);
        let value = u64_to_f64(value);
        let delta = value - self.mean;
        self.mean += delta / u64_to_f64(self.count);
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    fn std_dev(&self) -> f64 {
        if self.count > 1 {
            (self.m2 / u64_to_f64(self.count - 1)).sqrt()
        } else {
            0.0
        }
    }
}
