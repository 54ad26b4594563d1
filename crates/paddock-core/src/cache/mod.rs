//! In-memory caching of computed standings.
//!
//! This module provides the `StandingsCache`, which keeps the latest
//! multi-season result for a bounded time (12 hours by default) before the
//! next request triggers a recomputation. Nothing is written to disk.

pub mod manager;

pub use manager::{CachedData, StandingsCache};
