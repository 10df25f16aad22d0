//! New manager bounce analysis.
//!
//! # Usage
//!
//! ```bash
//! # Pooled report plus one report per team
//! manager-bounce all
//!
//! # Pooled report only
//! manager-bounce overall --output reports
//!
//! # One team, with its labeled match table
//! manager-bounce team "Swansea City" --export
//!
//! # Read a local checkout of the open-data repository
//! STATSBOMB_DATA_DIR=~/open-data/data manager-bounce all
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use manager_bounce::bounce::{team_slug, TeamAnalysis, DEFAULT_WINDOW_SIZE};
use manager_bounce::data::{LocalOpenData, Match, MatchSource, SeasonLoader, StatsBombClient};
use manager_bounce::metrics::{PpgComparison, DEFAULT_ALPHA};
use manager_bounce::report::{
    export_tables, render_comparison, team_title, write_summary, StudySummary, OVERALL_TITLE,
};
use manager_bounce::study::{BounceStudy, StudyConfig, TeamReport};

const SEPARATOR: &str = "============================================================";

#[derive(Parser)]
#[command(name = "manager-bounce")]
#[command(about = "Do teams earn more points right after hiring a new manager?")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output directory for charts and tables
    #[arg(long, global = true, default_value = "reports")]
    output: PathBuf,

    /// Matches counted as a bounce after each hire
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Significance level of the t-test
    #[arg(long, global = true, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Local open-data `data/` directory (skips HTTP)
    #[arg(long, global = true, env = "STATSBOMB_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Also write labeled match tables and a JSON summary
    #[arg(long, global = true)]
    export: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bounce vs non-bounce PPG pooled across every team
    Overall,

    /// Bounce vs non-bounce PPG for one team
    Team {
        /// Team name, e.g. "Aston Villa"
        name: String,
    },

    /// Pooled report followed by every team's report
    All,
}

fn print_report(title: &str, cmp: &PpgComparison) {
    println!("{}", SEPARATOR);
    println!("{}", title);
    println!("{}", SEPARATOR);
    println!("{}", cmp.summary());
    println!("{}\n", cmp.console_line());
}

fn cmd_overall(cli: &Cli, study: &BounceStudy, matches: &[Match]) -> Result<()> {
    let result = study.run_with_data(matches)?;

    print_report(OVERALL_TITLE, &result.overall);
    render_comparison(&cli.output.join("overall_bounce.svg"), OVERALL_TITLE, &result.overall)?;

    if cli.export {
        export(cli, study, &result.analyses(), Some(&result.overall), &result.teams)?;
    }
    Ok(())
}

fn cmd_team(cli: &Cli, study: &BounceStudy, matches: &[Match], name: &str) -> Result<()> {
    let report = study.team_report(matches, name)?;
    let title = team_title(&report.analysis.team);

    print_report(&title, &report.comparison);
    let path = cli
        .output
        .join(format!("{}_bounce.svg", team_slug(&report.analysis.team)));
    render_comparison(&path, &title, &report.comparison)?;

    if cli.export {
        let analyses = vec![report.analysis.clone()];
        export(cli, study, &analyses, None, std::slice::from_ref(&report))?;
    }
    Ok(())
}

fn cmd_all(cli: &Cli, study: &BounceStudy, matches: &[Match]) -> Result<()> {
    let result = study.run_with_data(matches)?;

    print_report(OVERALL_TITLE, &result.overall);
    render_comparison(&cli.output.join("overall_bounce.svg"), OVERALL_TITLE, &result.overall)?;

    let pb = ProgressBar::new(result.teams.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    for report in &result.teams {
        let team = &report.analysis.team;
        pb.set_message(team.clone());

        let title = team_title(team);
        pb.println(format!(
            "{}\n{}\n{}\n{}\n{}\n",
            SEPARATOR,
            title,
            SEPARATOR,
            report.comparison.summary(),
            report.comparison.console_line()
        ));
        let path = cli.output.join(format!("{}_bounce.svg", team_slug(team)));
        render_comparison(&path, &title, &report.comparison)
            .with_context(|| format!("Failed to render chart for {}", team))?;

        pb.inc(1);
    }
    pb.finish_with_message("reports complete");

    if cli.export {
        export(cli, study, &result.analyses(), Some(&result.overall), &result.teams)?;
    }
    Ok(())
}

/// Write the labeled tables and `summary.json`.
///
/// `overall` is `None` for a single-team run, so the summary never presents
/// one team's comparison as the pooled result.
fn export(
    cli: &Cli,
    study: &BounceStudy,
    analyses: &[TeamAnalysis],
    overall: Option<&PpgComparison>,
    reports: &[TeamReport],
) -> Result<()> {
    let written = export_tables(&cli.output, analyses)?;
    let summary = StudySummary::new(study.config(), overall, reports);
    write_summary(&cli.output.join("summary.json"), &summary)?;

    println!("Exported {} tables and summary.json to {}", written.len(), cli.output.display());
    Ok(())
}

async fn run<S: MatchSource>(cli: &Cli, study: &BounceStudy, loader: SeasonLoader<S>) -> Result<()> {
    let matches = study
        .load_matches(&loader)
        .await
        .context("Failed to load season matches")?;

    match &cli.command {
        Commands::Overall => cmd_overall(cli, study, &matches),
        Commands::Team { name } => cmd_team(cli, study, &matches, name),
        Commands::All => cmd_all(cli, study, &matches),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("manager_bounce=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;

    let config = StudyConfig {
        window_size: cli.window,
        alpha: cli.alpha,
        ..StudyConfig::default()
    };
    let study = BounceStudy::new(config);

    match &cli.data_dir {
        Some(dir) => run(&cli, &study, SeasonLoader::new(LocalOpenData::new(dir))).await,
        None => run(&cli, &study, SeasonLoader::new(StatsBombClient::new())).await,
    }
}
