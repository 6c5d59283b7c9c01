use draft_lottery::{DEFAULT_TOTAL_TICKETS, LeagueConfig, LeagueConfigError, LeagueLoader};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read league file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("league file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: LeagueConfigError,
    },
    #[error(transparent)]
    Inline(#[from] LeagueConfigError),
}

/// Where the league definition is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum LeagueOrigin {
    /// Built-in ten-team league.
    Sample,
    /// JSON league file.
    File(PathBuf),
    /// `NAME=PERCENT` tokens from the command line.
    Inline { name: String, specs: Vec<String> },
}

/// League origin plus an optional ticket-total override.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueSource {
    pub origin: LeagueOrigin,
    pub total_tickets: Option<u64>,
}

impl LeagueSource {
    pub const fn new(origin: LeagueOrigin, total_tickets: Option<u64>) -> Self {
        Self {
            origin,
            total_tickets,
        }
    }
}

impl LeagueLoader for LeagueSource {
    type Error = LoadError;

    fn load_league(&self) -> Result<LeagueConfig, Self::Error> {
        let mut league = match &self.origin {
            LeagueOrigin::Sample => LeagueConfig::sample(),
            LeagueOrigin::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
                LeagueConfig::from_json_str(&json).map_err(|source| LoadError::File {
                    path: path.clone(),
                    source,
                })?
            }
            LeagueOrigin::Inline { name, specs } => LeagueConfig::from_team_specs(
                name,
                specs,
                self.total_tickets.unwrap_or(DEFAULT_TOTAL_TICKETS),
            )?,
        };
        if let Some(total) = self.total_tickets {
            league.total_tickets = total;
        }
        log::debug!(
            "loaded league {:?}: {} teams, {} tickets",
            league.name,
            league.teams.len(),
            league.total_tickets
        );
        Ok(league)
    }
}
