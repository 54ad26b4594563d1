//! Season orchestration.
//!
//! `SeasonOrchestrator` drives one season from schedule to ranked result.
//! `MultiSeasonCoordinator` runs every supported season concurrently and
//! collects the year-indexed result, surfacing failed years.

pub mod coordinator;
pub mod orchestrator;

pub use coordinator::MultiSeasonCoordinator;
pub use orchestrator::SeasonOrchestrator;
