//! Paddock - cumulative championship standings from the command line.
//!
//! Fetches public race results, aggregates them into per-event and cumulative
//! points for every driver and team, and prints the ranked standings or the
//! full result as JSON.
//!
//! ## Commands
//!
//! - `season <YEAR>`: standings for one season
//! - `all`: every configured season, with any failed years listed
//! - `config`: effective configuration and where it is stored

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paddock_core::utils::{format_gap, format_missing_events, truncate_string};
use paddock_core::{
    Config, MultiSeasonCoordinator, MultiSeasonResult, RankedEntry, ResultsClient,
    SeasonOrchestrator, SeasonResult,
};

// ============================================================================
// Constants
// ============================================================================

/// Width of the name column in standings tables
const NAME_WIDTH: usize = 24;

/// Width of the team column in standings tables
const TEAM_WIDTH: usize = 18;

#[derive(Parser)]
#[command(name = "paddock")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cumulative championship standings per driver and team", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "PADDOCK_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the standings for one season
    Season {
        /// Season year, e.g. 2021
        year: u16,

        /// Show the team standings instead of drivers
        #[arg(long)]
        teams: bool,

        /// Print the full season result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute every configured season
    All {
        /// Print the full multi-season result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; with a log file they are also appended there. The
/// returned guard must be held until exit so buffered lines are flushed.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref())?;

    let config = Config::load().context("Failed to load configuration")?;
    info!(
        first_year = config.first_year,
        last_year = config.last_year,
        "Paddock starting"
    );

    match cli.command {
        Commands::Season { year, teams, json } => run_season(&config, year, teams, json).await,
        Commands::All { json } => run_all(&config, json).await,
        Commands::Config => show_config(&config),
    }
}

fn build_coordinator(config: &Config) -> Result<MultiSeasonCoordinator> {
    let client = ResultsClient::new(config.base_url.as_str())
        .context("Failed to create results client")?;
    let orchestrator = SeasonOrchestrator::with_client(client, config);
    Ok(MultiSeasonCoordinator::new(orchestrator, config))
}

async fn run_season(config: &Config, year: u16, teams: bool, json: bool) -> Result<()> {
    if !(config.first_year..=config.last_year).contains(&year) {
        bail!(
            "Season {} is outside the supported range {}-{}",
            year,
            config.first_year,
            config.last_year
        );
    }

    let result = build_coordinator(config)?
        .run_season(year)
        .await
        .with_context(|| format!("Could not compute season {}", year))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if teams {
        print_team_standings(&result);
    } else {
        print_driver_standings(&result);
    }
    if !result.missing_events.is_empty() {
        eprintln!(
            "\nNo results for event(s) {}; counted as zero.",
            format_missing_events(&result.locations, &result.missing_events)
        );
    }
    if !result.missing_secondary_events.is_empty() {
        eprintln!(
            "\nNo sprint results for event(s) {}; sprint counted as zero.",
            format_missing_events(&result.locations, &result.missing_secondary_events)
        );
    }
    Ok(())
}

async fn run_all(config: &Config, json: bool) -> Result<()> {
    // Each invocation computes once, so there is nothing to cache between calls
    let result = build_coordinator(config)?.run().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_champions(&result);
    if !result.is_complete() {
        eprintln!("\nSeasons without data:");
        for (year, reason) in &result.failed {
            eprintln!("  {}: {}", year, reason);
        }
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("Config file: {}", Config::config_path()?.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

// ============================================================================
// Table output
// ============================================================================

fn leader_total(entries: &[RankedEntry]) -> paddock_core::Points {
    entries
        .first()
        .map(|e| e.series.total())
        .unwrap_or_default()
}

fn print_driver_standings(result: &SeasonResult) {
    println!(
        "{} drivers' standings after {} events\n",
        result.year,
        result.event_count()
    );
    println!(
        "{:>3}  {:<name$}  {:<team$}  {:>6}  {:>6}",
        "Pos",
        "Driver",
        "Team",
        "Pts",
        "Gap",
        name = NAME_WIDTH,
        team = TEAM_WIDTH
    );

    let leader = leader_total(&result.competitors);
    for (rank, entry) in result.competitors.iter().enumerate() {
        let team = result
            .competitor_teams
            .get(&entry.name)
            .map(String::as_str)
            .unwrap_or("");
        println!(
            "{:>3}  {:<name$}  {:<team$}  {:>6}  {:>6}",
            rank + 1,
            truncate_string(&entry.name, NAME_WIDTH),
            truncate_string(team, TEAM_WIDTH),
            entry.series.total().to_string(),
            format_gap(leader, entry.series.total()),
            name = NAME_WIDTH,
            team = TEAM_WIDTH
        );
    }
}

fn print_team_standings(result: &SeasonResult) {
    println!(
        "{} constructors' standings after {} events\n",
        result.year,
        result.event_count()
    );
    println!(
        "{:>3}  {:<team$}  {:>6}  {:>6}  Drivers",
        "Pos",
        "Team",
        "Pts",
        "Gap",
        team = TEAM_WIDTH
    );

    let leader = leader_total(&result.teams);
    for (rank, entry) in result.teams.iter().enumerate() {
        let drivers = result
            .team_competitors
            .get(&entry.name)
            .map(|names| names.join(", "))
            .unwrap_or_default();
        println!(
            "{:>3}  {:<team$}  {:>6}  {:>6}  {}",
            rank + 1,
            truncate_string(&entry.name, TEAM_WIDTH),
            entry.series.total().to_string(),
            format_gap(leader, entry.series.total()),
            drivers,
            team = TEAM_WIDTH
        );
    }
}

fn print_champions(result: &MultiSeasonResult) {
    println!(
        "{:>4}  {:<name$}  {:>6}  {:<team$}  {:>6}",
        "Year",
        "Driver",
        "Pts",
        "Team",
        "Pts",
        name = NAME_WIDTH,
        team = TEAM_WIDTH
    );
    for (year, season) in &result.seasons {
        let (driver, driver_pts) = season
            .competitors
            .first()
            .map(|e| (e.name.as_str(), e.series.total().to_string()))
            .unwrap_or(("", String::new()));
        let (team, team_pts) = season
            .teams
            .first()
            .map(|e| (e.name.as_str(), e.series.total().to_string()))
            .unwrap_or(("", String::new()));
        println!(
            "{:>4}  {:<name$}  {:>6}  {:<team$}  {:>6}",
            year,
            truncate_string(driver, NAME_WIDTH),
            driver_pts,
            truncate_string(team, TEAM_WIDTH),
            team_pts,
            name = NAME_WIDTH,
            team = TEAM_WIDTH
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_season_command() {
        let cli = Cli::try_parse_from(["paddock", "season", "2021", "--teams"]).unwrap();
        match cli.command {
            Commands::Season { year, teams, json } => {
                assert_eq!(year, 2021);
                assert!(teams);
                assert!(!json);
            }
            _ => panic!("expected season command"),
        }
    }

    #[test]
    fn test_log_file_is_global() {
        let cli = Cli::try_parse_from(["paddock", "all", "--log-file", "paddock.log"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("paddock.log")));
        assert!(matches!(cli.command, Commands::All { json: false }));
    }
}
