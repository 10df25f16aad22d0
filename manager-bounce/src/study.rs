//! Bounce study pipeline.
//!
//! Load a season once, label every configured team's matches, then compare
//! bounce and non-bounce PPG both pooled across teams and per team.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::bounce::{
    analyze_team, find_team, season_2015_16, BounceConfig, BounceError, TeamAnalysis,
    DEFAULT_WINDOW_SIZE,
};
use crate::data::{team_matches, LoaderError, Match, MatchSource, SeasonLoader};
use crate::metrics::{MetricsError, PointsSamples, PpgComparison, DEFAULT_ALPHA};

#[derive(Error, Debug)]
pub enum StudyError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error("{team}: {source}")]
    Bounce {
        team: String,
        #[source]
        source: BounceError,
    },

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("{0} is not in the season table")]
    UnknownTeam(String),
}

/// Configuration for a bounce study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Competition name as listed by the provider.
    pub league: String,

    /// Season name, e.g. "2015/2016".
    pub season: String,

    /// Matches per bounce window.
    pub window_size: usize,

    /// Significance level of the t-test.
    pub alpha: f64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            league: "Premier League".to_string(),
            season: "2015/2016".to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// One team's labeled matches and its own comparison.
#[derive(Debug, Clone)]
pub struct TeamReport {
    pub analysis: TeamAnalysis,
    pub comparison: PpgComparison,
}

/// Result of a full study.
#[derive(Debug, Clone)]
pub struct StudyResult {
    pub config: StudyConfig,
    /// Comparison pooled across every team.
    pub overall: PpgComparison,
    pub teams: Vec<TeamReport>,
}

impl StudyResult {
    pub fn analyses(&self) -> Vec<TeamAnalysis> {
        self.teams.iter().map(|t| t.analysis.clone()).collect()
    }
}

/// Runs the bounce analysis over a table of team configurations.
pub struct BounceStudy {
    config: StudyConfig,
    teams: Vec<BounceConfig>,
}

impl BounceStudy {
    /// Study of the 2015/16 managerial changes.
    pub fn new(config: StudyConfig) -> Self {
        let teams = season_2015_16(config.window_size);
        Self { config, teams }
    }

    /// Study over a custom team table.
    pub fn with_teams(config: StudyConfig, teams: Vec<BounceConfig>) -> Self {
        Self { config, teams }
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    pub fn teams(&self) -> &[BounceConfig] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Result<&BounceConfig, StudyError> {
        find_team(&self.teams, name).ok_or_else(|| StudyError::UnknownTeam(name.to_string()))
    }

    /// Fetch the configured season.
    pub async fn load_matches<S: MatchSource>(
        &self,
        loader: &SeasonLoader<S>,
    ) -> Result<Vec<Match>, StudyError> {
        Ok(loader
            .load_season(&self.config.league, &self.config.season)
            .await?)
    }

    /// Label one team's matches from the full season.
    pub fn analyze_team(
        &self,
        season_matches: &[Match],
        team: &BounceConfig,
    ) -> Result<TeamAnalysis, StudyError> {
        let matches = team_matches(season_matches, &team.team);
        analyze_team(&matches, team).map_err(|source| StudyError::Bounce {
            team: team.team.clone(),
            source,
        })
    }

    /// Label every configured team.
    pub fn analyze(&self, season_matches: &[Match]) -> Result<Vec<TeamAnalysis>, StudyError> {
        self.teams
            .iter()
            .map(|team| self.analyze_team(season_matches, team))
            .collect()
    }

    /// Comparison pooled across `analyses`.
    pub fn overall(&self, analyses: &[TeamAnalysis]) -> Result<PpgComparison, StudyError> {
        let samples = PointsSamples::pooled(analyses);
        Ok(PpgComparison::from_samples(&samples, self.config.alpha)?)
    }

    /// Report for a single named team.
    pub fn team_report(&self, season_matches: &[Match], name: &str) -> Result<TeamReport, StudyError> {
        let team = self.team(name)?;
        let analysis = self.analyze_team(season_matches, team)?;
        self.report_for(analysis)
    }

    fn report_for(&self, analysis: TeamAnalysis) -> Result<TeamReport, StudyError> {
        let samples = PointsSamples::from_team(&analysis);
        let comparison = PpgComparison::from_samples(&samples, self.config.alpha)?;
        Ok(TeamReport {
            analysis,
            comparison,
        })
    }

    /// Run the study on an already loaded season.
    pub fn run_with_data(&self, season_matches: &[Match]) -> Result<StudyResult, StudyError> {
        let analyses = self.analyze(season_matches)?;
        let overall = self.overall(&analyses)?;

        info!(
            teams = analyses.len(),
            bounce_matches = overall.n_bounce,
            non_bounce_matches = overall.n_non_bounce,
            p_value = overall.test.p_value,
            "study complete"
        );

        let teams = analyses
            .into_iter()
            .map(|a| self.report_for(a))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StudyResult {
            config: self.config.clone(),
            overall,
            teams,
        })
    }

    /// Load the season and run the study.
    pub async fn run<S: MatchSource>(&self, loader: &SeasonLoader<S>) -> Result<StudyResult, StudyError> {
        let matches = self.load_matches(loader).await?;
        self.run_with_data(&matches)
    }
}
