//! In-memory results source shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use paddock_core::models::{secondary_reference, RawRow, ScheduledEvent, SeasonSchedule};
use paddock_core::{Config, FetchError, RowExtractor, ScheduleProvider, SeasonOrchestrator};

/// Serves schedules and results tables from memory.
#[derive(Default)]
pub struct FakeResults {
    schedules: HashMap<u16, Vec<ScheduledEvent>>,
    pages: HashMap<(u16, String), Vec<RawRow>>,
    failing: HashSet<(u16, String)>,
    delays: HashMap<u16, Duration>,
}

impl FakeResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event with its primary results to `year`'s schedule
    pub fn event(mut self, year: u16, location: &str, rows: Vec<RawRow>) -> Self {
        let events = self.schedules.entry(year).or_default();
        let reference = format!(
            "{}/races/{}/{}/race-result",
            year,
            events.len() + 1,
            location.to_lowercase()
        );
        events.push(ScheduledEvent::new(location, reference.clone()));
        self.pages.insert((year, reference), rows);
        self
    }

    /// Short-format results for an event already added
    pub fn sprint(mut self, year: u16, index: usize, rows: Vec<RawRow>) -> Self {
        let reference = self.reference(year, index);
        if let Some(secondary) = secondary_reference(&reference) {
            self.pages.insert((year, secondary), rows);
        }
        self
    }

    /// Make the primary results of an event fail with a server error
    pub fn fail_event(mut self, year: u16, index: usize) -> Self {
        let reference = self.reference(year, index);
        self.failing.insert((year, reference));
        self
    }

    /// Delay the schedule of `year` by `delay`
    pub fn delay(mut self, year: u16, delay: Duration) -> Self {
        self.delays.insert(year, delay);
        self
    }

    pub fn into_orchestrator(self, config: &Config) -> SeasonOrchestrator {
        let source = Arc::new(self);
        SeasonOrchestrator::new(source.clone(), source, config)
    }

    fn reference(&self, year: u16, index: usize) -> String {
        self.schedules
            .get(&year)
            .and_then(|events| events.get(index))
            .map(|event| event.reference.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScheduleProvider for FakeResults {
    async fn fetch_schedule(&self, year: u16) -> Result<SeasonSchedule, FetchError> {
        if let Some(delay) = self.delays.get(&year) {
            tokio::time::sleep(*delay).await;
        }
        self.schedules
            .get(&year)
            .map(|events| SeasonSchedule::new(year, events.clone()))
            .ok_or_else(|| FetchError::NotFound(format!("{}/races", year)))
    }
}

#[async_trait]
impl RowExtractor for FakeResults {
    async fn fetch_rows(&self, year: u16, reference: &str) -> Result<Vec<RawRow>, FetchError> {
        let key = (year, reference.to_string());
        if self.failing.contains(&key) {
            return Err(FetchError::ServerError(reference.to_string()));
        }
        // Yield so concurrently running seasons interleave their fetches
        tokio::task::yield_now().await;
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(reference.to_string()))
    }
}

/// One results row: (code, name, team, points)
pub fn row(code: &str, name: &str, team: &str, points: &str) -> RawRow {
    RawRow {
        position: Some("1".to_string()),
        competitor_name: Some(name.to_string()),
        competitor_code: Some(code.to_string()),
        team: Some(team.to_string()),
        points: Some(points.to_string()),
        ..RawRow::default()
    }
}

pub fn config(first_year: u16, last_year: u16) -> Config {
    Config {
        first_year,
        last_year,
        ..Config::default()
    }
}
