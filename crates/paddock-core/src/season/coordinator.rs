use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::SeasonOrchestrator;
use crate::config::Config;
use crate::error::SeasonError;
use crate::models::{MultiSeasonResult, SeasonResult};
use crate::palette;

/// Runs every supported season through a bounded pool of orchestrations.
#[derive(Clone)]
pub struct MultiSeasonCoordinator {
    orchestrator: SeasonOrchestrator,
    years: Vec<u16>,
    max_concurrent_seasons: usize,
    season_timeout: Duration,
}

impl MultiSeasonCoordinator {
    pub fn new(orchestrator: SeasonOrchestrator, config: &Config) -> Self {
        Self {
            orchestrator,
            years: config.years(),
            max_concurrent_seasons: config.max_concurrent_seasons.max(1),
            season_timeout: Duration::from_secs(config.season_timeout_secs),
        }
    }

    pub fn years(&self) -> &[u16] {
        &self.years
    }

    /// Compute one season, bounded by the per-season timeout
    pub async fn run_season(&self, year: u16) -> Result<SeasonResult, SeasonError> {
        match tokio::time::timeout(self.season_timeout, self.orchestrator.run(year)).await {
            Ok(result) => result,
            Err(_) => Err(SeasonError::Timeout {
                year,
                secs: self.season_timeout.as_secs(),
            }),
        }
    }

    /// Compute every season and assemble the year-indexed result.
    ///
    /// Seasons finish in any order; the output maps are keyed by year.
    /// Failed seasons are absent from `seasons` and listed in `failed`.
    pub async fn run(&self) -> MultiSeasonResult {
        info!(
            seasons = self.years.len(),
            concurrency = self.max_concurrent_seasons,
            "Starting standings refresh"
        );

        let outcomes: Vec<(u16, Result<SeasonResult, SeasonError>)> =
            stream::iter(self.years.iter().copied())
                .map(|year| async move { (year, self.run_season(year).await) })
                .buffer_unordered(self.max_concurrent_seasons)
                .collect()
                .await;

        let mut seasons = BTreeMap::new();
        let mut failed = BTreeMap::new();
        for (year, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    seasons.insert(year, result);
                }
                Err(e) => {
                    warn!(year, error = %e, "Season failed");
                    failed.insert(year, e.to_string());
                }
            }
        }

        info!(
            computed = seasons.len(),
            failed = failed.len(),
            "Standings refresh complete"
        );

        MultiSeasonResult {
            seasons,
            team_colors: palette::palette(&self.years),
            failed,
            generated_at: Utc::now(),
        }
    }
}
