use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Points;

/// Running total and per-event contribution for one competitor or team.
///
/// Both vectors have one entry per scheduled event and
/// `cumulative[i] == delta[0] + ... + delta[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PerEntitySeries {
    pub cumulative: Vec<Points>,
    pub delta: Vec<Points>,
}

impl PerEntitySeries {
    /// Build the series from per-event contributions via a running prefix sum.
    pub fn from_deltas(delta: Vec<Points>) -> Self {
        let cumulative = delta
            .iter()
            .scan(Points::ZERO, |total, &pts| {
                *total += pts;
                Some(*total)
            })
            .collect();
        Self { cumulative, delta }
    }

    pub fn len(&self) -> usize {
        self.delta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    /// Final-season total; zero for an empty season.
    pub fn total(&self) -> Points {
        self.cumulative.last().copied().unwrap_or(Points::ZERO)
    }

    /// Element-wise sum of both arrays. Both series must cover the same season.
    pub fn merged_with(&self, other: &PerEntitySeries) -> PerEntitySeries {
        let zip = |a: &[Points], b: &[Points]| a.iter().zip(b).map(|(x, y)| *x + *y).collect();
        PerEntitySeries {
            cumulative: zip(&self.cumulative, &other.cumulative),
            delta: zip(&self.delta, &other.delta),
        }
    }
}

/// One entry of a ranked standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RankedEntry {
    pub name: String,
    #[serde(flatten)]
    pub series: PerEntitySeries,
}

/// Everything computed for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SeasonResult {
    pub year: u16,
    /// Competitor code -> full name
    pub competitor_names: BTreeMap<String, String>,
    /// Competitors ordered by final total, highest first
    pub competitors: Vec<RankedEntry>,
    /// Canonical teams ordered by final total, highest first
    pub teams: Vec<RankedEntry>,
    /// Scraped team name -> canonical team name
    pub team_names: BTreeMap<String, String>,
    /// Canonical team -> competitor names
    pub team_competitors: BTreeMap<String, Vec<String>>,
    /// Competitor name -> canonical team
    pub competitor_teams: BTreeMap<String, String>,
    /// Event location labels in schedule order
    pub locations: Vec<String>,
    /// Event indices whose results were unavailable and counted as empty
    #[serde(default)]
    pub missing_events: Vec<usize>,
    /// Event indices whose sprint results were unavailable; the race still counts
    #[serde(default)]
    pub missing_secondary_events: Vec<usize>,
}

impl SeasonResult {
    pub fn event_count(&self) -> usize {
        self.locations.len()
    }

    pub fn competitor(&self, name: &str) -> Option<&RankedEntry> {
        self.competitors.iter().find(|e| e.name == name)
    }

    pub fn team(&self, name: &str) -> Option<&RankedEntry> {
        self.teams.iter().find(|e| e.name == name)
    }
}

/// Year-indexed results for every supported season of one refresh cycle.
///
/// A year that is absent from `seasons` means the data is unavailable, never
/// that everyone scored zero. Years that were attempted and failed are listed
/// in `failed` with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MultiSeasonResult {
    pub seasons: BTreeMap<u16, SeasonResult>,
    /// Year -> (canonical team -> display color)
    pub team_colors: BTreeMap<u16, BTreeMap<String, String>>,
    pub failed: BTreeMap<u16, String>,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub generated_at: DateTime<Utc>,
}

impl MultiSeasonResult {
    pub fn season(&self, year: u16) -> Option<&SeasonResult> {
        self.seasons.get(&year)
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
