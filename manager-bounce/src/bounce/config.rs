//! Per-team bounce configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Matches counted as a bounce after each hire.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Bounce configuration for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceConfig {
    /// Team name as published by the data provider.
    pub team: String,
    /// Hire dates of each new manager, in ascending order.
    pub hire_dates: Vec<NaiveDate>,
    /// Number of matches after a hire labeled as bounce.
    pub window_size: usize,
}

impl BounceConfig {
    pub fn new(team: &str, hire_dates: Vec<NaiveDate>, window_size: usize) -> Self {
        Self {
            team: team.to_string(),
            hire_dates,
            window_size,
        }
    }
}

/// File-name friendly team name, e.g. `"swansea_city"`.
pub fn team_slug(team: &str) -> String {
    team.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Premier League 2015/16 teams that changed manager during the season.
pub fn season_2015_16(window_size: usize) -> Vec<BounceConfig> {
    vec![
        // Advocaat -> Allardyce
        BounceConfig::new("Sunderland", vec![ymd(2015, 10, 9)], window_size),
        // Rodgers -> Klopp
        BounceConfig::new("Liverpool", vec![ymd(2015, 10, 9)], window_size),
        // Monk -> Curtis (caretaker) -> Guidolin
        BounceConfig::new(
            "Swansea City",
            vec![ymd(2015, 12, 9), ymd(2016, 1, 18)],
            window_size,
        ),
        // Sherwood -> Garde -> Black
        BounceConfig::new(
            "Aston Villa",
            vec![ymd(2015, 11, 2), ymd(2016, 3, 29)],
            window_size,
        ),
        // Mourinho -> Hiddink
        BounceConfig::new("Chelsea", vec![ymd(2015, 12, 20)], window_size),
        // McClaren -> Benitez
        BounceConfig::new("Newcastle United", vec![ymd(2016, 3, 11)], window_size),
    ]
}

/// Look up a team's entry, ignoring case.
pub fn find_team<'a>(configs: &'a [BounceConfig], team: &str) -> Option<&'a BounceConfig> {
    configs.iter().find(|c| c.team.eq_ignore_ascii_case(team))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_table() {
        let table = season_2015_16(DEFAULT_WINDOW_SIZE);
        assert_eq!(table.len(), 6);
        assert!(table.iter().all(|c| c.window_size == 5));
        assert!(table
            .iter()
            .all(|c| c.hire_dates.windows(2).all(|w| w[0] < w[1])));

        let two_hires: Vec<&str> = table
            .iter()
            .filter(|c| c.hire_dates.len() == 2)
            .map(|c| c.team.as_str())
            .collect();
        assert_eq!(two_hires, vec!["Swansea City", "Aston Villa"]);
    }

    #[test]
    fn test_find_team() {
        let table = season_2015_16(3);
        let swansea = find_team(&table, "swansea city").unwrap();
        assert_eq!(swansea.hire_dates[1], NaiveDate::from_ymd_opt(2016, 1, 18).unwrap());
        assert_eq!(swansea.window_size, 3);
        assert!(find_team(&table, "Arsenal").is_none());
    }

    #[test]
    fn test_slug() {
        assert_eq!(team_slug("Newcastle United"), "newcastle_united");
        assert_eq!(team_slug("Chelsea"), "chelsea");
    }
}
