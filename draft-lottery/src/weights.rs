//! Validated team weight tables.
//!
//! A [`WeightTable`] maps each team to the number of tickets it holds in the
//! lottery pool. Construction enforces the table invariants, so every other
//! module can assume a non-empty table of unique teams with positive weights.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::numbers::ratio;

/// Reasons a set of team weights cannot form a lottery pool.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeightTableError {
    #[error("weight table has no teams")]
    Empty,
    #[error("team name at position {position} is blank")]
    BlankTeam { position: usize },
    #[error("team {team:?} appears more than once")]
    DuplicateTeam { team: String },
    #[error("team {team:?} has non-positive weight {weight}")]
    NonPositiveWeight { team: String, weight: i64 },
    #[error("total ticket count overflows at team {team:?}")]
    TotalOverflow { team: String },
}

/// One team and the tickets it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamWeight {
    pub team: String,
    pub tickets: u64,
}

/// Single-draw probability for a team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOdds {
    pub team: String,
    pub tickets: u64,
    pub probability: f64,
}

/// Immutable, validated team to ticket-count table.
///
/// Entries keep the order they were supplied in; that order is only used for
/// display and never influences the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightTable {
    entries: Vec<TeamWeight>,
    total_tickets: u64,
}

impl WeightTable {
    /// Build a table from `(team, weight)` pairs.
    ///
    /// Team names are trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, a name is blank or repeated, a
    /// weight is zero or negative, or the ticket total does not fit in `u64`.
    pub fn new<I, S>(weights: I) -> Result<Self, WeightTableError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut total_tickets: u64 = 0;

        for (position, (team, weight)) in weights.into_iter().enumerate() {
            let team = team.into().trim().to_string();
            if team.is_empty() {
                return Err(WeightTableError::BlankTeam { position });
            }
            if !seen.insert(team.clone()) {
                return Err(WeightTableError::DuplicateTeam { team });
            }
            let tickets = match u64::try_from(weight) {
                Ok(tickets) if tickets > 0 => tickets,
                _ => return Err(WeightTableError::NonPositiveWeight { team, weight }),
            };
            total_tickets = total_tickets
                .checked_add(tickets)
                .ok_or_else(|| WeightTableError::TotalOverflow { team: team.clone() })?;
            entries.push(TeamWeight { team, tickets });
        }

        if entries.is_empty() {
            return Err(WeightTableError::Empty);
        }

        Ok(Self {
            entries,
            total_tickets,
        })
    }

    /// Number of teams in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the conceptual ticket pool.
    #[must_use]
    pub const fn total_tickets(&self) -> u64 {
        self.total_tickets
    }

    #[must_use]
    pub fn entries(&self) -> &[TeamWeight] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TeamWeight> {
        self.entries.get(index)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.team.as_str())
    }

    /// Tickets held by `team`, if present.
    #[must_use]
    pub fn tickets_for(&self, team: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.team == team)
            .map(|entry| entry.tickets)
    }

    /// Probability of each team winning a single draw.
    #[must_use]
    pub fn odds(&self) -> Vec<TeamOdds> {
        self.entries
            .iter()
            .map(|entry| TeamOdds {
                team: entry.team.clone(),
                tickets: entry.tickets,
                probability: ratio(entry.tickets, self.total_tickets),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_table_and_sums_tickets() {
        let table = WeightTable::new([("Aces", 700), ("Bats", 200), ("Cubs", 100)]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.total_tickets(), 1_000);
        assert_eq!(table.tickets_for("Bats"), Some(200));
        assert_eq!(
            table.teams().collect::<Vec<_>>(),
            vec!["Aces", "Bats", "Cubs"]
        );
    }

    #[test]
    fn rejects_empty_table() {
        let empty: Vec<(String, i64)> = Vec::new();
        assert_eq!(WeightTable::new(empty), Err(WeightTableError::Empty));
    }

    #[test]
    fn rejects_zero_and_negative_weights() {
        assert_eq!(
            WeightTable::new([("Aces", 10), ("Bats", 0)]),
            Err(WeightTableError::NonPositiveWeight {
                team: "Bats".to_string(),
                weight: 0
            })
        );
        assert!(matches!(
            WeightTable::new([("Aces", -5)]),
            Err(WeightTableError::NonPositiveWeight { weight: -5, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_teams_after_trimming() {
        assert_eq!(
            WeightTable::new([("Aces", 1), (" Aces ", 2)]),
            Err(WeightTableError::DuplicateTeam {
                team: "Aces".to_string()
            })
        );
    }

    #[test]
    fn rejects_blank_team_names() {
        assert_eq!(
            WeightTable::new([("Aces", 1), ("   ", 2)]),
            Err(WeightTableError::BlankTeam { position: 1 })
        );
    }

    #[test]
    fn rejects_total_overflow() {
        let result = WeightTable::new([("Aces", i64::MAX), ("Bats", i64::MAX), ("Cubs", 2)]);
        assert_eq!(
            result,
            Err(WeightTableError::TotalOverflow {
                team: "Cubs".to_string()
            })
        );
    }

    #[test]
    fn odds_sum_to_one() {
        let table = WeightTable::new([("Aces", 900_000), ("Bats", 100_000)]).unwrap();
        let odds = table.odds();
        assert!((odds[0].probability - 0.9).abs() < 1e-12);
        let sum: f64 = odds.iter().map(|o| o.probability).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
