//! Core data types for match analysis.
//!
//! These types represent fetched match results once they have been
//! normalised away from the provider's JSON layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of a fixture a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// A single played match.
///
/// Immutable once fetched: labeling and points are derived into
/// separate records rather than written back here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Provider match id
    pub match_id: u64,

    /// Date the match was played
    pub date: NaiveDate,

    pub home_team: String,

    pub away_team: String,

    pub home_score: u32,

    pub away_score: u32,
}

impl Match {
    /// Side played by `team`, or `None` if the team was not involved.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team {
            Some(Side::Home)
        } else if self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Whether `team` played in this match.
    pub fn involves(&self, team: &str) -> bool {
        self.side_of(team).is_some()
    }

    /// Goals scored and conceded from the point of view of `side`.
    pub fn score_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Match {
        Match {
            match_id: 1,
            date: NaiveDate::from_ymd_opt(2015, 10, 17).unwrap(),
            home_team: "Swansea City".to_string(),
            away_team: "Sunderland".to_string(),
            home_score: 0,
            away_score: 1,
        }
    }

    #[test]
    fn test_side_of() {
        let m = fixture();
        assert_eq!(m.side_of("Swansea City"), Some(Side::Home));
        assert_eq!(m.side_of("Sunderland"), Some(Side::Away));
        assert_eq!(m.side_of("Chelsea"), None);
        assert!(!m.involves("Chelsea"));
    }

    #[test]
    fn test_score_for_side() {
        let m = fixture();
        assert_eq!(m.score_for(Side::Home), (0, 1));
        assert_eq!(m.score_for(Side::Away), (1, 0));
    }
}
