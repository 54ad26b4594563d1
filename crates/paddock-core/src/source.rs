//! Collaborator seams for fetching schedules and results tables.
//!
//! The orchestrator only talks to these traits. `ResultsClient` implements
//! both against the live results site; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::api::FetchError;
use crate::models::{RawRow, SeasonSchedule};

/// Supplies the ordered events of a season.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    async fn fetch_schedule(&self, year: u16) -> Result<SeasonSchedule, FetchError>;
}

/// Supplies the results table of one event.
#[async_trait]
pub trait RowExtractor: Send + Sync {
    /// Fetch every row of the event identified by `reference`. A reference
    /// that names no page yields `FetchError::NotFound`.
    async fn fetch_rows(&self, year: u16, reference: &str) -> Result<Vec<RawRow>, FetchError>;
}
