//! Draft Lottery
//!
//! Weighted draft-order lottery for fantasy leagues. Each team holds tickets in
//! proportion to its odds; tickets are drawn from a cryptographically secure
//! source until every team has been drawn, and teams are placed in the order
//! their first ticket appears.
//!
//! No seed is exposed on the production path: draws go through
//! [`SecureChoice`], which only accepts `CryptoRng` generators.

pub mod draft;
pub mod entropy;
pub mod league;
pub mod numbers;
pub mod sampler;
pub mod stats;
pub mod weights;

// Re-export commonly used types
pub use draft::{
    DraftError, DraftOutcome, DrawLimits, DrawRecord, compute_draft_order, draft_order,
    draft_order_with_limits,
};
pub use entropy::{SecureChoice, os_entropy};
pub use league::{DEFAULT_TOTAL_TICKETS, LeagueConfig, LeagueConfigError, TeamPercent};
pub use sampler::TicketSampler;
pub use stats::{TeamTrialStats, TrialSummary, simulate_trials};
pub use weights::{TeamOdds, TeamWeight, WeightTable, WeightTableError};

use serde::Serialize;

/// Trait for abstracting where league definitions come from.
/// Front ends provide implementations (files, inline flags, built-ins).
pub trait LeagueLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the league definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the league cannot be read or parsed.
    fn load_league(&self) -> Result<LeagueConfig, Self::Error>;
}

/// Single lottery result tagged with its league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueDraw {
    pub league: String,
    pub odds: Vec<TeamOdds>,
    pub total_tickets: u64,
    pub outcome: DraftOutcome,
}

/// Trial batch tagged with its league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTrials {
    pub league: String,
    pub summary: TrialSummary,
}

/// Runs lotteries for whatever league a [`LeagueLoader`] supplies.
pub struct DraftLottery<L>
where
    L: LeagueLoader,
{
    loader: L,
    limits: DrawLimits,
}

impl<L> DraftLottery<L>
where
    L: LeagueLoader,
{
    pub const fn new(loader: L, limits: DrawLimits) -> Self {
        Self { loader, limits }
    }

    /// Load the league and validate it into a ticket table.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the league is invalid.
    pub fn prepare(&self) -> Result<(LeagueConfig, WeightTable), anyhow::Error> {
        let league = self.loader.load_league()?;
        let table = league.weight_table()?;
        Ok((league, table))
    }

    /// Draw one full draft order.
    ///
    /// # Errors
    ///
    /// Returns an error if the league is invalid or the draw cap is hit.
    pub fn draw<S>(&self, source: &mut S) -> Result<LeagueDraw, anyhow::Error>
    where
        S: SecureChoice + ?Sized,
    {
        let (league, table) = self.prepare()?;
        let outcome = draft_order_with_limits(&table, source, self.limits)?;
        Ok(LeagueDraw {
            league: league.name,
            odds: table.odds(),
            total_tickets: table.total_tickets(),
            outcome,
        })
    }

    /// Run `trials` lotteries and aggregate where each team lands.
    ///
    /// # Errors
    ///
    /// Returns an error if the league is invalid or any run hits the draw cap.
    pub fn simulate<S>(&self, trials: u64, source: &mut S) -> Result<LeagueTrials, anyhow::Error>
    where
        S: SecureChoice + ?Sized,
    {
        let (league, table) = self.prepare()?;
        let summary = simulate_trials(&table, trials, source, self.limits)?;
        Ok(LeagueTrials {
            league: league.name,
            summary,
        })
    }
}
