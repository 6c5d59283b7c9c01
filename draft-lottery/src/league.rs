//! League configuration: team win percentages scaled onto a ticket total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numbers::percent_to_tickets;
use crate::weights::{WeightTable, WeightTableError};

/// Ticket total used when a league file does not name one.
pub const DEFAULT_TOTAL_TICKETS: u64 = 1_000_000;

/// Percent sums further than this from 100 are logged.
const PERCENT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum LeagueConfigError {
    #[error("total ticket count must be positive")]
    ZeroTickets,
    #[error("team {team:?} has invalid percentage {percent}")]
    InvalidPercent { team: String, percent: f64 },
    #[error("team spec {token:?} is not NAME=PERCENT")]
    MalformedTeamSpec { token: String },
    #[error("league file could not be parsed: {0}")]
    Parse(String),
    #[error(transparent)]
    Table(#[from] WeightTableError),
}

/// A team and its chance of winning the lottery, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPercent {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "LeagueConfig::default_name")]
    pub name: String,
    #[serde(default = "LeagueConfig::default_total_tickets")]
    pub total_tickets: u64,
    pub teams: Vec<TeamPercent>,
}

impl LeagueConfig {
    fn default_name() -> String {
        "League".to_string()
    }

    const fn default_total_tickets() -> u64 {
        DEFAULT_TOTAL_TICKETS
    }

    /// Ten-team league with descending odds, totalling 100%.
    #[must_use]
    pub fn sample() -> Self {
        const ODDS: [(&str, f64); 10] = [
            ("Basement Dwellers", 25.0),
            ("Tank Commanders", 20.0),
            ("Waiver Wire Warriors", 15.0),
            ("Bench Warmers", 12.0),
            ("Sleeper Picks", 9.0),
            ("Trade Bait", 7.0),
            ("Bye Week Blues", 5.0),
            ("Playoff Pretenders", 3.5),
            ("Almost Champs", 2.5),
            ("Runners Up", 1.0),
        ];
        Self {
            name: "Sample League".to_string(),
            total_tickets: DEFAULT_TOTAL_TICKETS,
            teams: ODDS
                .iter()
                .map(|&(name, percent)| TeamPercent {
                    name: name.to_string(),
                    percent,
                })
                .collect(),
        }
    }

    /// Parse a league from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueConfigError::Parse`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, LeagueConfigError> {
        serde_json::from_str(json).map_err(|err| LeagueConfigError::Parse(err.to_string()))
    }

    /// Build a league from `NAME=PERCENT` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueConfigError::MalformedTeamSpec`] for tokens without a
    /// name or a numeric percentage.
    pub fn from_team_specs(
        name: &str,
        tokens: &[String],
        total_tickets: u64,
    ) -> Result<Self, LeagueConfigError> {
        let teams = tokens
            .iter()
            .map(|token| {
                let malformed = || LeagueConfigError::MalformedTeamSpec {
                    token: token.clone(),
                };
                let (team, percent) = token.rsplit_once('=').ok_or_else(malformed)?;
                let percent: f64 = percent.trim().parse().map_err(|_| malformed())?;
                if team.trim().is_empty() {
                    return Err(malformed());
                }
                Ok(TeamPercent {
                    name: team.trim().to_string(),
                    percent,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            total_tickets,
            teams,
        })
    }

    #[must_use]
    pub fn percent_sum(&self) -> f64 {
        self.teams.iter().map(|team| team.percent).sum()
    }

    /// Convert percentages into a validated ticket table.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket total is zero, a percentage is not
    /// finite, or the resulting weights break a [`WeightTable`] invariant
    /// (including percentages too small to earn a single ticket).
    pub fn weight_table(&self) -> Result<WeightTable, LeagueConfigError> {
        if self.total_tickets == 0 {
            return Err(LeagueConfigError::ZeroTickets);
        }

        let weights = self
            .teams
            .iter()
            .map(|team| {
                percent_to_tickets(team.percent, self.total_tickets)
                    .map(|tickets| (team.name.clone(), tickets))
                    .ok_or_else(|| LeagueConfigError::InvalidPercent {
                        team: team.name.clone(),
                        percent: team.percent,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sum = self.percent_sum();
        if !self.teams.is_empty() && (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
            log::warn!(
                "{}: team percentages sum to {sum:.4}, odds are normalized by ticket count",
                self.name
            );
        }

        Ok(WeightTable::new(weights)?)
    }
}
