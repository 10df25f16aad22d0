//! Match points under 3/1/0 scoring.

use serde::{Deserialize, Serialize};

use crate::data::Match;

/// Result of a match for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Outcome from goals scored and conceded.
    pub fn from_goals(scored: u32, conceded: u32) -> Self {
        if scored > conceded {
            Self::Win
        } else if scored == conceded {
            Self::Draw
        } else {
            Self::Loss
        }
    }

    /// League points awarded.
    pub fn points(&self) -> u8 {
        match self {
            Self::Win => 3,
            Self::Draw => 1,
            Self::Loss => 0,
        }
    }
}

/// Outcome of `m` for `team`, or `None` if the team did not play.
pub fn outcome_for(m: &Match, team: &str) -> Option<MatchOutcome> {
    let side = m.side_of(team)?;
    let (scored, conceded) = m.score_for(side);
    Some(MatchOutcome::from_goals(scored, conceded))
}

/// Points `team` earned from `m`, or `None` if the team did not play.
pub fn points_for(m: &Match, team: &str) -> Option<u8> {
    outcome_for(m, team).map(|o| o.points())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn result(home_score: u32, away_score: u32) -> Match {
        Match {
            match_id: 7,
            date: NaiveDate::from_ymd_opt(2015, 12, 26).unwrap(),
            home_team: "Chelsea".to_string(),
            away_team: "Watford".to_string(),
            home_score,
            away_score,
        }
    }

    #[test]
    fn test_home_win() {
        let m = result(2, 0);
        assert_eq!(points_for(&m, "Chelsea"), Some(3));
        assert_eq!(points_for(&m, "Watford"), Some(0));
    }

    #[test]
    fn test_away_win() {
        let m = result(1, 3);
        assert_eq!(outcome_for(&m, "Watford"), Some(MatchOutcome::Win));
        assert_eq!(outcome_for(&m, "Chelsea"), Some(MatchOutcome::Loss));
    }

    #[test]
    fn test_draw_gives_both_one_point() {
        let m = result(2, 2);
        assert_eq!(points_for(&m, "Chelsea"), Some(1));
        assert_eq!(points_for(&m, "Watford"), Some(1));
    }

    #[test]
    fn test_team_not_in_match() {
        assert_eq!(points_for(&result(1, 0), "Arsenal"), None);
    }

    #[test]
    fn test_points_bounded_for_every_scoreline() {
        for home in 0..6 {
            for away in 0..6 {
                let m = result(home, away);
                let h = points_for(&m, "Chelsea").unwrap();
                let a = points_for(&m, "Watford").unwrap();
                assert!([0, 1, 3].contains(&h));
                assert!([0, 1, 3].contains(&a));
                assert!(h + a <= 3);
                if home == away {
                    assert_eq!(h + a, 2);
                } else {
                    assert_eq!(h + a, 3);
                }
            }
        }
    }
}
