//! Report output: comparison charts, labeled tables and JSON summaries.

pub mod chart;
pub mod table;

use polars::prelude::PolarsError;
use thiserror::Error;

pub use chart::{bar_colors, render_comparison, team_title, OVERALL_TITLE};
pub use table::{
    analysis_to_dataframe, combined_dataframe, export_tables, write_summary, write_table,
    StudySummary, TeamSummary, TABLE_COLUMNS,
};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
