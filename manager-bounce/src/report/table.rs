//! Labeled match tables and the JSON summary.
//!
//! Tables are written in the column layout the analysis was originally
//! inspected in: one row per match, with `is_manager_bounce` (0/1) and
//! `points_from_match` appended to the fixture columns.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use super::ReportError;
use crate::bounce::TeamAnalysis;
use crate::metrics::PpgComparison;
use crate::study::{StudyConfig, TeamReport};

/// Columns of an exported table.
pub const TABLE_COLUMNS: &[&str] = &[
    "team",
    "match_id",
    "match_date",
    "home_team",
    "away_team",
    "home_score",
    "away_score",
    "is_manager_bounce",
    "points_from_match",
];

/// Convert one team's labeled records to a DataFrame.
pub fn analysis_to_dataframe(analysis: &TeamAnalysis) -> PolarsResult<DataFrame> {
    let n = analysis.records.len();
    let mut team: Vec<&str> = Vec::with_capacity(n);
    let mut match_id: Vec<i64> = Vec::with_capacity(n);
    let mut match_date: Vec<String> = Vec::with_capacity(n);
    let mut home_team: Vec<&str> = Vec::with_capacity(n);
    let mut away_team: Vec<&str> = Vec::with_capacity(n);
    let mut home_score: Vec<i32> = Vec::with_capacity(n);
    let mut away_score: Vec<i32> = Vec::with_capacity(n);
    let mut is_manager_bounce: Vec<i32> = Vec::with_capacity(n);
    let mut points_from_match: Vec<i32> = Vec::with_capacity(n);

    for record in &analysis.records {
        let m = &record.fixture;
        team.push(&analysis.team);
        match_id.push(m.match_id as i64);
        match_date.push(m.date.format("%Y-%m-%d").to_string());
        home_team.push(&m.home_team);
        away_team.push(&m.away_team);
        home_score.push(m.home_score as i32);
        away_score.push(m.away_score as i32);
        is_manager_bounce.push(record.is_bounce as i32);
        points_from_match.push(record.points as i32);
    }

    df!(
        "team" => team,
        "match_id" => match_id,
        "match_date" => match_date,
        "home_team" => home_team,
        "away_team" => away_team,
        "home_score" => home_score,
        "away_score" => away_score,
        "is_manager_bounce" => is_manager_bounce,
        "points_from_match" => points_from_match,
    )
}

/// Stack several teams' tables into one.
pub fn combined_dataframe(analyses: &[TeamAnalysis]) -> PolarsResult<DataFrame> {
    let frames = analyses
        .iter()
        .map(|a| analysis_to_dataframe(a).map(|df| df.lazy()))
        .collect::<PolarsResult<Vec<_>>>()?;
    if frames.is_empty() {
        return analysis_to_dataframe(&TeamAnalysis {
            team: String::new(),
            hire_dates: vec![],
            window_size: 0,
            records: vec![],
        });
    }
    concat(&frames, UnionArgs::default())?.collect()
}

/// Write a table as Parquet (`.parquet`) or CSV (anything else).
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Zstd(Some(ZstdLevel::try_new(3)?)))
                .finish(df)?;
        }
        _ => {
            CsvWriter::new(file).include_header(true).finish(df)?;
        }
    }

    info!(path = %path.display(), rows = df.height(), "table written");
    Ok(())
}

/// Export each team's table plus the combined one into `dir`.
pub fn export_tables(dir: &Path, analyses: &[TeamAnalysis]) -> Result<Vec<PathBuf>, ReportError> {
    let mut written = Vec::with_capacity(analyses.len() + 1);

    for analysis in analyses {
        let path = dir.join(format!("{}_matches.csv", crate::bounce::team_slug(&analysis.team)));
        write_table(&mut analysis_to_dataframe(analysis)?, &path)?;
        written.push(path);
    }

    let path = dir.join("all_matches.parquet");
    write_table(&mut combined_dataframe(analyses)?, &path)?;
    written.push(path);

    Ok(written)
}

#[derive(Debug, Serialize)]
pub struct TeamSummary<'a> {
    pub team: &'a str,
    pub hire_dates: &'a [NaiveDate],
    pub window_size: usize,
    pub comparison: &'a PpgComparison,
}

impl<'a> TeamSummary<'a> {
    pub fn from_report(report: &'a TeamReport) -> Self {
        Self {
            team: &report.analysis.team,
            hire_dates: &report.analysis.hire_dates,
            window_size: report.analysis.window_size,
            comparison: &report.comparison,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudySummary<'a> {
    pub league: &'a str,
    pub season: &'a str,
    /// Comparison pooled across every configured team. Left out of
    /// single-team summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<&'a PpgComparison>,
    pub teams: Vec<TeamSummary<'a>>,
}

impl<'a> StudySummary<'a> {
    pub fn new(
        config: &'a StudyConfig,
        overall: Option<&'a PpgComparison>,
        reports: &'a [TeamReport],
    ) -> Self {
        Self {
            league: &config.league,
            season: &config.season,
            overall,
            teams: reports.iter().map(TeamSummary::from_report).collect(),
        }
    }
}

/// Serialise the comparisons to pretty JSON.
pub fn write_summary(path: &Path, summary: &StudySummary<'_>) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
