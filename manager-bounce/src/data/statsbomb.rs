//! StatsBomb open-data access.
//!
//! The open-data repository publishes one `competitions.json` listing every
//! competition/season pair, and one `matches/{competition_id}/{season_id}.json`
//! file per season. Both are served over HTTP from GitHub, or can be read
//! from a local checkout of the repository.

use std::path::PathBuf;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Match;

/// Raw file root of the StatsBomb open-data repository.
pub const OPEN_DATA_BASE_URL: &str =
    "https://raw.githubusercontent.com/statsbomb/open-data/master/data";

/// Errors raised while talking to a match source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One competition/season pair offered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub competition_id: u32,
    pub season_id: u32,
    pub competition_name: String,
    pub season_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHomeTeam {
    pub home_team_id: u32,
    pub home_team_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAwayTeam {
    pub away_team_id: u32,
    pub away_team_name: String,
}

/// Raw match record as published by the provider.
///
/// Only the fields the analysis needs are decoded; the rest of the
/// provider's record is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatch {
    pub match_id: u64,
    pub match_date: String,
    pub home_team: RawHomeTeam,
    pub away_team: RawAwayTeam,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

impl RawMatch {
    /// Parse the match date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.match_date, "%Y-%m-%d").ok()
    }

    /// Convert to a played `Match`.
    ///
    /// Returns `None` when the date does not parse or either score is
    /// missing (fixture not played yet).
    pub fn to_match(&self) -> Option<Match> {
        Some(Match {
            match_id: self.match_id,
            date: self.date()?,
            home_team: self.home_team.home_team_name.clone(),
            away_team: self.away_team.away_team_name.clone(),
            home_score: self.home_score?,
            away_score: self.away_score?,
        })
    }
}

/// Provider of competitions and season matches.
#[allow(async_fn_in_trait)]
pub trait MatchSource {
    /// All competition/season pairs with data available.
    async fn competitions(&self) -> Result<Vec<Competition>, SourceError>;

    /// All matches of one competition season, in provider order.
    async fn matches(
        &self,
        competition_id: u32,
        season_id: u32,
    ) -> Result<Vec<RawMatch>, SourceError>;
}

/// HTTP client for the hosted open-data repository.
pub struct StatsBombClient {
    client: Client,
    base_url: String,
}

impl StatsBombClient {
    /// Create a client against the public repository.
    pub fn new() -> Self {
        Self::with_base_url(OPEN_DATA_BASE_URL)
    }

    /// Create a client against a mirror of the repository.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "fetching");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError(format!("{} {}: {}", status, url, text)));
        }

        response.json().await.map_err(|e| {
            SourceError::InvalidResponse(format!("Failed to parse {}: {}", url, e))
        })
    }
}

impl Default for StatsBombClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSource for StatsBombClient {
    async fn competitions(&self) -> Result<Vec<Competition>, SourceError> {
        self.request("competitions.json").await
    }

    async fn matches(
        &self,
        competition_id: u32,
        season_id: u32,
    ) -> Result<Vec<RawMatch>, SourceError> {
        self.request(&format!("matches/{}/{}.json", competition_id, season_id))
            .await
    }
}

/// Local checkout of the open-data repository (its `data/` directory).
pub struct LocalOpenData {
    root: PathBuf,
}

impl LocalOpenData {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read<T: for<'de> Deserialize<'de>>(&self, path: PathBuf) -> Result<T, SourceError> {
        let display = path.display().to_string();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io {
                path: display.clone(),
                source,
            })?;

        serde_json::from_str(&content)
            .map_err(|e| SourceError::InvalidResponse(format!("Failed to parse {}: {}", display, e)))
    }
}

impl MatchSource for LocalOpenData {
    async fn competitions(&self) -> Result<Vec<Competition>, SourceError> {
        self.read(self.root.join("competitions.json")).await
    }

    async fn matches(
        &self,
        competition_id: u32,
        season_id: u32,
    ) -> Result<Vec<RawMatch>, SourceError> {
        let path = self
            .root
            .join("matches")
            .join(competition_id.to_string())
            .join(format!("{}.json", season_id));
        self.read(path).await
    }
}
