use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::api::{FetchError, ResultsClient};
use crate::config::Config;
use crate::engine::{build_ledger, compute_season, EventRows};
use crate::error::SeasonError;
use crate::models::{ScheduledEvent, SeasonResult};
use crate::source::{RowExtractor, ScheduleProvider};

/// Builds one season's standings from its schedule and event results.
///
/// Clone is cheap; providers are shared through `Arc`.
#[derive(Clone)]
pub struct SeasonOrchestrator {
    schedules: Arc<dyn ScheduleProvider>,
    rows: Arc<dyn RowExtractor>,
    event_fetch_concurrency: usize,
    secondary_events_from: u16,
    abort_on_event_failure: bool,
}

impl SeasonOrchestrator {
    pub fn new(
        schedules: Arc<dyn ScheduleProvider>,
        rows: Arc<dyn RowExtractor>,
        config: &Config,
    ) -> Self {
        Self {
            schedules,
            rows,
            event_fetch_concurrency: config.event_fetch_concurrency.max(1),
            secondary_events_from: config.secondary_events_from,
            abort_on_event_failure: config.abort_on_event_failure,
        }
    }

    /// Orchestrator backed by the live results site for both schedules and rows
    pub fn with_client(client: ResultsClient, config: &Config) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, config)
    }

    pub fn supports_secondary_events(&self, year: u16) -> bool {
        year >= self.secondary_events_from
    }

    /// Compute the standings for `year`.
    ///
    /// A missing schedule fails the season. An event whose results cannot be
    /// fetched counts as empty and is listed in `missing_events`; a sprint
    /// that cannot be fetched counts as empty on its own and is listed in
    /// `missing_secondary_events`. With `abort_on_event_failure` either
    /// failure fails the season instead.
    pub async fn run(&self, year: u16) -> Result<SeasonResult, SeasonError> {
        info!(year, "Computing season");

        let schedule = self
            .schedules
            .fetch_schedule(year)
            .await
            .map_err(|source| SeasonError::ScheduleRetrieval { year, source })?;

        let include_secondary = self.supports_secondary_events(year);
        debug!(year, events = schedule.len(), include_secondary, "Schedule fetched");

        // `buffered` yields in input order, so indices follow the schedule
        // regardless of which fetch completes first.
        let mut fetches = stream::iter(schedule.events.iter().enumerate())
            .map(|(index, event)| async move {
                (index, self.fetch_event(year, event, include_secondary).await)
            })
            .buffered(self.event_fetch_concurrency);

        let mut events = Vec::with_capacity(schedule.len());
        let mut missing_events = Vec::new();
        let mut missing_secondary_events = Vec::new();
        while let Some((index, outcome)) = fetches.next().await {
            match outcome {
                Ok((rows, None)) => events.push(rows),
                Ok((rows, Some(source))) => {
                    let location = &schedule.events[index].location;
                    if self.abort_on_event_failure {
                        return Err(SeasonError::EventRetrieval {
                            year,
                            index,
                            location: format!("{} sprint", location),
                            source,
                        });
                    }
                    warn!(
                        year,
                        event = index,
                        location = %location,
                        error = %source,
                        "Sprint results unavailable, counting sprint as empty"
                    );
                    missing_secondary_events.push(index);
                    events.push(rows);
                }
                Err(source) => {
                    let location = schedule.events[index].location.clone();
                    if self.abort_on_event_failure {
                        return Err(SeasonError::EventRetrieval {
                            year,
                            index,
                            location,
                            source,
                        });
                    }
                    warn!(
                        year,
                        event = index,
                        location = %location,
                        error = %source,
                        "Event results unavailable, counting as empty"
                    );
                    missing_events.push(index);
                    events.push(EventRows::default());
                }
            }
        }

        let ledger = build_ledger(events, include_secondary);
        let (mut result, ambiguities) =
            compute_season(year, schedule.locations(), &ledger, missing_events);
        result.missing_secondary_events = missing_secondary_events;
        if !ambiguities.is_empty() {
            debug!(year, count = ambiguities.len(), "Team name variants merged despite overlap");
        }

        info!(
            year,
            events = result.event_count(),
            competitors = result.competitors.len(),
            teams = result.teams.len(),
            "Season computed"
        );
        Ok(result)
    }

    /// Fetch an event's race rows and, when supported, its sprint rows.
    ///
    /// A failed race fetch fails the event. A failed sprint fetch keeps the
    /// race rows and is returned alongside them.
    async fn fetch_event(
        &self,
        year: u16,
        event: &ScheduledEvent,
        include_secondary: bool,
    ) -> Result<(EventRows, Option<FetchError>), FetchError> {
        let primary = self.rows.fetch_rows(year, &event.reference).await?;

        let mut secondary_error = None;
        let secondary = match event.secondary_reference() {
            Some(reference) if include_secondary => {
                match self.rows.fetch_rows(year, &reference).await {
                    Ok(rows) => Some(rows),
                    // Most weekends have no short-format race
                    Err(e) if e.is_not_found() => None,
                    Err(e) => {
                        secondary_error = Some(e);
                        None
                    }
                }
            }
            _ => None,
        };

        debug!(
            year,
            location = %event.location,
            primary = primary.len(),
            secondary = secondary.as_ref().map_or(0, Vec::len),
            "Event fetched"
        );
        Ok((EventRows { primary, secondary }, secondary_error))
    }
}
