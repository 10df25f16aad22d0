//! Season loader.
//!
//! Resolves provider identifiers for a league/season pair, fetches the
//! season's matches and narrows them down to a single team.

use thiserror::Error;
use tracing::{info, warn};

use super::statsbomb::{Competition, MatchSource, SourceError};
use super::types::Match;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No provider data for {league} {season}")]
    UnknownSeason { league: String, season: String },

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Provider identifiers of one competition season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonId {
    pub competition_id: u32,
    pub season_id: u32,
}

/// Find the identifiers of `league` / `season` in a competition listing.
pub fn resolve_season(
    competitions: &[Competition],
    league: &str,
    season: &str,
) -> Result<SeasonId, LoaderError> {
    competitions
        .iter()
        .find(|c| c.competition_name == league && c.season_name == season)
        .map(|c| SeasonId {
            competition_id: c.competition_id,
            season_id: c.season_id,
        })
        .ok_or_else(|| LoaderError::UnknownSeason {
            league: league.to_string(),
            season: season.to_string(),
        })
}

/// Matches involving `team`, in chronological order.
pub fn team_matches(matches: &[Match], team: &str) -> Vec<Match> {
    let mut selected: Vec<Match> = matches.iter().filter(|m| m.involves(team)).cloned().collect();
    selected.sort_by_key(|m| (m.date, m.match_id));
    selected
}

/// Loads full seasons from a match source.
pub struct SeasonLoader<S> {
    source: S,
}

impl<S: MatchSource> SeasonLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Look up the provider identifiers for a league/season pair.
    pub async fn season_id(&self, league: &str, season: &str) -> Result<SeasonId, LoaderError> {
        let competitions = self.source.competitions().await?;
        resolve_season(&competitions, league, season)
    }

    /// Load all played matches of a season, sorted by date.
    pub async fn load_season(&self, league: &str, season: &str) -> Result<Vec<Match>, LoaderError> {
        let id = self.season_id(league, season).await?;
        let raw = self.source.matches(id.competition_id, id.season_id).await?;

        let mut matches = Vec::with_capacity(raw.len());
        for record in &raw {
            if record.date().is_none() {
                return Err(LoaderError::InvalidData(format!(
                    "Invalid date {:?} for match {}",
                    record.match_date, record.match_id
                )));
            }
            match record.to_match() {
                Some(m) => matches.push(m),
                None => warn!(match_id = record.match_id, "skipping match without a final score"),
            }
        }

        matches.sort_by_key(|m| (m.date, m.match_id));

        info!(
            league,
            season,
            competition_id = id.competition_id,
            season_id = id.season_id,
            matches = matches.len(),
            "loaded season"
        );

        Ok(matches)
    }
}
