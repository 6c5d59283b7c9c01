pub mod league;
pub mod reports;

pub use league::{LeagueOrigin, LeagueSource};
