//! Data models for season standings.
//!
//! This module contains the data structures shared by the engine and its
//! collaborators:
//!
//! - `RawRow`, `EventRecord`: one competitor's result in one event
//! - `ScheduledEvent`, `SeasonSchedule`: the ordered events of a season
//! - `Points`: exact half-point arithmetic with integer-when-integral output
//! - `PerEntitySeries`, `RankedEntry`, `SeasonResult`, `MultiSeasonResult`:
//!   the aggregation output consumed by presentation layers

pub mod points;
pub mod record;
pub mod schedule;
pub mod season;

pub use points::{ParsePointsError, Points};
pub use record::{split_driver_cell, EventRecord, RawRow, RowDefect, COMPETITOR_CODE_LEN};
pub use schedule::{secondary_reference, ScheduledEvent, SeasonSchedule};
pub use season::{MultiSeasonResult, PerEntitySeries, RankedEntry, SeasonResult};
