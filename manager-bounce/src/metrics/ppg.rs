//! Points-per-game comparison between bounce and non-bounce matches.

use serde::{Deserialize, Serialize};

use super::significance::{mean, t_test_greater, TTestResult};
use super::MetricsError;
use crate::bounce::TeamAnalysis;

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Pooled per-match points, split by bounce label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsSamples {
    pub bounce: Vec<u8>,
    pub non_bounce: Vec<u8>,
}

impl PointsSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples of a single team.
    pub fn from_team(analysis: &TeamAnalysis) -> Self {
        let mut samples = Self::new();
        samples.add_team(analysis);
        samples
    }

    /// Samples pooled across several teams.
    pub fn pooled<'a>(analyses: impl IntoIterator<Item = &'a TeamAnalysis>) -> Self {
        let mut samples = Self::new();
        for analysis in analyses {
            samples.add_team(analysis);
        }
        samples
    }

    /// Append one team's labeled points.
    pub fn add_team(&mut self, analysis: &TeamAnalysis) {
        self.bounce.extend(analysis.bounce_points());
        self.non_bounce.extend(analysis.non_bounce_points());
    }

    pub fn total_matches(&self) -> usize {
        self.bounce.len() + self.non_bounce.len()
    }
}

fn as_f64(points: &[u8]) -> Vec<f64> {
    points.iter().map(|&p| p as f64).collect()
}

/// Which hypothesis the test supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// PPG during bounces is significantly greater.
    BounceGreater,
    /// No significant difference.
    NoDifference,
}

/// Which group earned more points per game, for chart coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    Bounce,
    NonBounce,
    Tied,
}

/// PPG for bounce vs non-bounce matches with the significance test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpgComparison {
    pub ppg_bounce: f64,
    pub ppg_non_bounce: f64,
    pub n_bounce: usize,
    pub n_non_bounce: usize,
    pub test: TTestResult,
    pub alpha: f64,
}

impl PpgComparison {
    /// Compare the two samples at significance level `alpha`.
    pub fn from_samples(samples: &PointsSamples, alpha: f64) -> Result<Self, MetricsError> {
        let bounce = as_f64(&samples.bounce);
        let non_bounce = as_f64(&samples.non_bounce);

        let ppg_bounce = mean(&bounce).ok_or(MetricsError::EmptySample("bounce"))?;
        let ppg_non_bounce = mean(&non_bounce).ok_or(MetricsError::EmptySample("non-bounce"))?;
        let test = t_test_greater(&bounce, &non_bounce)?;

        Ok(Self {
            ppg_bounce,
            ppg_non_bounce,
            n_bounce: samples.bounce.len(),
            n_non_bounce: samples.non_bounce.len(),
            test,
            alpha,
        })
    }

    pub fn verdict(&self) -> Verdict {
        if self.test.is_significant(self.alpha) {
            Verdict::BounceGreater
        } else {
            Verdict::NoDifference
        }
    }

    pub fn leader(&self) -> Leader {
        if self.ppg_bounce > self.ppg_non_bounce {
            Leader::Bounce
        } else if self.ppg_non_bounce > self.ppg_bounce {
            Leader::NonBounce
        } else {
            Leader::Tied
        }
    }

    /// Verdict line printed to the console.
    pub fn console_line(&self) -> String {
        let p = self.test.p_value;
        match self.verdict() {
            Verdict::BounceGreater => format!(
                "P-value = {:.4}: The PPG during new manager bounces is statistically greater than the PPG outside of the new manager bounce.",
                p
            ),
            Verdict::NoDifference => format!(
                "P-value = {:.4}: There is no statistically significant difference in PPG between the two periods.",
                p
            ),
        }
    }

    /// Short verdict used as the chart subtitle.
    pub fn headline(&self) -> String {
        let p = self.test.p_value;
        match self.verdict() {
            Verdict::BounceGreater => format!(
                "P-value {:.4} < {}: PPG statistically larger during new manager bounce.",
                p, self.alpha
            ),
            Verdict::NoDifference => format!(
                "P-value {:.4} > {}: No statistical diff. between bounce and non-bounce.",
                p, self.alpha
            ),
        }
    }

    /// Generate a summary report.
    pub fn summary(&self) -> String {
        format!(
            "Bounce:     {:.3} PPG over {} matches\n\
             Non-bounce: {:.3} PPG over {} matches\n\
             t = {:.4}, p = {:.4} (df = {})",
            self.ppg_bounce,
            self.n_bounce,
            self.ppg_non_bounce,
            self.n_non_bounce,
            self.test.t_statistic,
            self.test.p_value,
            self.test.degrees_of_freedom
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::bounce::TeamMatchRecord;
    use crate::data::Match;

    fn analysis(team: &str, labeled: &[(bool, u8)]) -> TeamAnalysis {
        let records = labeled
            .iter()
            .enumerate()
            .map(|(i, &(is_bounce, points))| TeamMatchRecord {
                fixture: Match {
                    match_id: i as u64,
                    date: NaiveDate::from_ymd_opt(2015, 8, 8).unwrap() + chrono::Duration::weeks(i as i64),
                    home_team: team.to_string(),
                    away_team: "Opponent".to_string(),
                    home_score: 0,
                    away_score: 0,
                },
                is_bounce,
                points,
            })
            .collect();
        TeamAnalysis {
            team: team.to_string(),
            hire_dates: vec![],
            window_size: 5,
            records,
        }
    }

    #[test]
    fn test_pooled_samples() {
        let a = analysis("Chelsea", &[(false, 0), (true, 3), (true, 1)]);
        let b = analysis("Liverpool", &[(true, 0), (false, 3), (false, 1)]);

        let samples = PointsSamples::pooled([&a, &b]);
        assert_eq!(samples.bounce, vec![3, 1, 0]);
        assert_eq!(samples.non_bounce, vec![0, 3, 1]);
        assert_eq!(samples.total_matches(), 6);
    }

    #[test]
    fn test_ppg_is_unweighted_mean() {
        let a = analysis("Chelsea", &[(true, 3), (true, 3), (false, 1), (false, 0)]);
        let b = analysis("Liverpool", &[(true, 0), (false, 3), (false, 0), (false, 0)]);
        let samples = PointsSamples::pooled([&a, &b]);

        let cmp = PpgComparison::from_samples(&samples, DEFAULT_ALPHA).unwrap();
        assert!((cmp.ppg_bounce - 2.0).abs() < 1e-12);
        assert!((cmp.ppg_non_bounce - 0.8).abs() < 1e-12);
        assert_eq!(cmp.n_bounce, samples.bounce.len());
        assert_eq!(cmp.n_non_bounce, samples.non_bounce.len());
        assert_eq!(cmp.leader(), Leader::Bounce);
    }

    #[test]
    fn test_significant_verdict() {
        let mut labeled = vec![(true, 3), (true, 3), (true, 3), (true, 1), (true, 3), (true, 3)];
        labeled.extend([0, 1, 0, 0, 1, 0, 3, 0, 0, 1].iter().map(|&p| (false, p)));
        let samples = PointsSamples::from_team(&analysis("Sunderland", &labeled));

        let cmp = PpgComparison::from_samples(&samples, DEFAULT_ALPHA).unwrap();
        assert_eq!(cmp.verdict(), Verdict::BounceGreater);
        assert_eq!(
            cmp.console_line(),
            "P-value = 0.0003: The PPG during new manager bounces is statistically greater than the PPG outside of the new manager bounce."
        );
        assert_eq!(
            cmp.headline(),
            "P-value 0.0003 < 0.05: PPG statistically larger during new manager bounce."
        );
    }

    #[test]
    fn test_no_difference_verdict() {
        let labeled = [(true, 1), (true, 1), (false, 0), (false, 3), (false, 0), (false, 1)];
        let samples = PointsSamples::from_team(&analysis("Chelsea", &labeled));

        let cmp = PpgComparison::from_samples(&samples, DEFAULT_ALPHA).unwrap();
        assert_eq!(cmp.leader(), Leader::Tied);
        assert_eq!(cmp.verdict(), Verdict::NoDifference);
        assert!(cmp.headline().ends_with("No statistical diff. between bounce and non-bounce."));
        assert!(cmp.console_line().contains("no statistically significant difference"));
    }

    #[test]
    fn test_empty_group_is_an_error() {
        let samples = PointsSamples::from_team(&analysis("Chelsea", &[(false, 3), (false, 1)]));
        let err = PpgComparison::from_samples(&samples, DEFAULT_ALPHA).unwrap_err();
        assert!(matches!(err, MetricsError::EmptySample("bounce")));
    }
}
