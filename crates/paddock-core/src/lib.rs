//! Paddock core - cumulative championship standings from public race results.
//!
//! For every supported season this crate fetches the schedule and the results
//! table of each event, files every row under its competitor and team at the
//! event's index, and derives per-event and cumulative points series for
//! competitors and canonical teams, ranked by final total.
//!
//! The crate is organized as:
//!
//! - `api`: results site client and HTML table extraction
//! - `source`: the `ScheduleProvider` and `RowExtractor` seams
//! - `engine`: ledger, aggregation, team canonicalization and ranking
//! - `season`: per-season orchestration and the multi-season coordinator
//! - `cache`: in-memory standings cache
//! - `config`, `palette`, `models`, `utils`

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod palette;
pub mod season;
pub mod source;
pub mod utils;

pub use api::{FetchError, ResultsClient};
pub use cache::StandingsCache;
pub use config::Config;
pub use error::SeasonError;
pub use models::{MultiSeasonResult, PerEntitySeries, Points, RankedEntry, SeasonResult};
pub use season::{MultiSeasonCoordinator, SeasonOrchestrator};
pub use source::{RowExtractor, ScheduleProvider};
