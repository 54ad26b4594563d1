use thiserror::Error;

use crate::api::FetchError;

/// Failures raised while building one season's standings.
#[derive(Error, Debug)]
pub enum SeasonError {
    /// No schedule means no event indices; the season cannot be aggregated.
    #[error("Schedule for {year} unavailable: {source}")]
    ScheduleRetrieval {
        year: u16,
        #[source]
        source: FetchError,
    },

    #[error("Results for {year} event {index} ({location}) unavailable: {source}")]
    EventRetrieval {
        year: u16,
        index: usize,
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("Malformed row in event {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// Reported, never fatal: the names are merged regardless.
    #[error("Teams {names:?} both canonicalize to {canonical:?} and raced in the same event {index}")]
    CanonicalizationAmbiguity {
        canonical: String,
        names: Vec<String>,
        index: usize,
    },

    #[error("Season {year} did not finish within {secs}s")]
    Timeout { year: u16, secs: u64 },
}
