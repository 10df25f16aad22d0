//! New manager bounce labeling.
//!
//! Turns a team's chronological match list into labeled records:
//! - bounce / non-bounce flag per match
//! - points earned per match (3/1/0)

pub mod config;
pub mod labeler;
pub mod points;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Match;

pub use config::{find_team, season_2015_16, team_slug, BounceConfig, DEFAULT_WINDOW_SIZE};
pub use labeler::{bounce_windows, label_bounce, BounceWindow};
pub use points::{outcome_for, points_for, MatchOutcome};

#[derive(Error, Debug)]
pub enum BounceError {
    #[error("Bounce window size must be at least 1")]
    InvalidWindowSize,

    #[error("At least one hire date is required")]
    NoHireDates,

    #[error("Hire dates out of order: {earlier} is not before {later}")]
    UnorderedHireDates { earlier: NaiveDate, later: NaiveDate },

    #[error("Matches are not in chronological order")]
    UnsortedMatches,

    #[error("Only {available} matches on or after {hire_date}, bounce window needs {window_size}")]
    InsufficientMatches {
        hire_date: NaiveDate,
        window_size: usize,
        available: usize,
    },

    #[error(
        "Bounce window after {first_hire} runs to {first_window_end}, past the next hire on {second_hire}"
    )]
    OverlappingWindows {
        first_hire: NaiveDate,
        first_window_end: NaiveDate,
        second_hire: NaiveDate,
    },

    #[error("{team} did not play match {match_id}")]
    TeamNotInMatch { team: String, match_id: u64 },

    #[error("No matches found for {0}")]
    UnknownTeam(String),
}

/// A match labeled relative to one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatchRecord {
    #[serde(flatten)]
    pub fixture: Match,
    pub is_bounce: bool,
    pub points: u8,
}

/// All of one team's labeled matches for a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub team: String,
    pub hire_dates: Vec<NaiveDate>,
    pub window_size: usize,
    pub records: Vec<TeamMatchRecord>,
}

impl TeamAnalysis {
    /// Points from matches inside a bounce window.
    pub fn bounce_points(&self) -> Vec<u8> {
        self.points_where(true)
    }

    /// Points from every other match.
    pub fn non_bounce_points(&self) -> Vec<u8> {
        self.points_where(false)
    }

    fn points_where(&self, is_bounce: bool) -> Vec<u8> {
        self.records
            .iter()
            .filter(|r| r.is_bounce == is_bounce)
            .map(|r| r.points)
            .collect()
    }
}

/// Label a team's matches and compute the points from each.
///
/// `matches` must already be restricted to the team and sorted by date,
/// as returned by [`crate::data::team_matches`].
pub fn analyze_team(matches: &[Match], config: &BounceConfig) -> Result<TeamAnalysis, BounceError> {
    if matches.is_empty() {
        return Err(BounceError::UnknownTeam(config.team.clone()));
    }

    let labels = label_bounce(matches, &config.hire_dates, config.window_size)?;

    let records = matches
        .iter()
        .zip(labels)
        .map(|(m, is_bounce)| -> Result<TeamMatchRecord, BounceError> {
            let points = points_for(m, &config.team).ok_or_else(|| BounceError::TeamNotInMatch {
                team: config.team.clone(),
                match_id: m.match_id,
            })?;
            Ok(TeamMatchRecord {
                fixture: m.clone(),
                is_bounce,
                points,
            })
        })
        .collect::<Result<Vec<_>, BounceError>>()?;

    Ok(TeamAnalysis {
        team: config.team.clone(),
        hire_dates: config.hire_dates.clone(),
        window_size: config.window_size,
        records,
    })
}
