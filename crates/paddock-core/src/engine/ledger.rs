//! Per-competitor, per-team result buckets for one season.
//!
//! Rows are filed under a `LedgerKey` (competitor code + team as scraped) at
//! the event's schedule index. A slot holds the primary race contribution and,
//! when the weekend had one, the sprint contribution.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SeasonError;
use crate::models::{EventRecord, Points, RawRow};

/// One competitor's position and points in one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub position: String,
    pub points: Points,
}

/// Results recorded at one event index. At most two contributions fit: the
/// primary race and the co-indexed short-format race.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    #[default]
    Empty,
    One(Contribution),
    Two(Contribution, Contribution),
}

impl Slot {
    /// Append a contribution, handing it back if the slot is already full.
    pub fn push(&mut self, contribution: Contribution) -> Result<(), Contribution> {
        match std::mem::take(self) {
            Slot::Empty => *self = Slot::One(contribution),
            Slot::One(first) => *self = Slot::Two(first, contribution),
            full @ Slot::Two(..) => {
                *self = full;
                return Err(contribution);
            }
        }
        Ok(())
    }

    /// Total points in this slot, `None` when the competitor did not take part.
    pub fn points(&self) -> Option<Points> {
        match self {
            Slot::Empty => None,
            Slot::One(c) => Some(c.points),
            Slot::Two(a, b) => Some(a.points + b.points),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// A competitor racing for a team, with the team name exactly as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerKey {
    pub competitor_code: String,
    pub team: String,
}

/// One slot per scheduled event.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerBucket {
    slots: Vec<Slot>,
}

impl LedgerBucket {
    fn new(event_count: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; event_count],
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

/// Rows fetched for one event index.
#[derive(Debug, Clone, Default)]
pub struct EventRows {
    pub primary: Vec<RawRow>,
    /// Short-format results, `None` when the season predates them or the
    /// weekend had no such event.
    pub secondary: Option<Vec<RawRow>>,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    event_count: usize,
    // Kept in first-seen order so aggregation is deterministic.
    buckets: Vec<(LedgerKey, LedgerBucket)>,
    index: HashMap<LedgerKey, usize>,
    competitor_names: BTreeMap<String, String>,
    competitor_teams: BTreeMap<String, String>,
}

impl Ledger {
    pub fn new(event_count: usize) -> Self {
        Self {
            event_count,
            ..Self::default()
        }
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// File one validated record at `index`.
    ///
    /// Fails with `MalformedRow` when the index lies outside the season or the
    /// slot already holds two contributions.
    pub fn record(&mut self, index: usize, record: EventRecord) -> Result<(), SeasonError> {
        if index >= self.event_count {
            return Err(SeasonError::MalformedRow {
                index,
                reason: format!("event index outside season of {} events", self.event_count),
            });
        }

        let key = LedgerKey {
            competitor_code: record.competitor_code.clone(),
            team: record.team.clone(),
        };
        let slot_idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.buckets.push((key.clone(), LedgerBucket::new(self.event_count)));
                self.index.insert(key, self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };

        let contribution = Contribution {
            position: record.position,
            points: record.points,
        };
        if self.buckets[slot_idx].1.slots[index].push(contribution).is_err() {
            return Err(SeasonError::MalformedRow {
                index,
                reason: format!(
                    "third result for {} ({}) in one event",
                    record.competitor_code, record.team
                ),
            });
        }

        self.competitor_names
            .insert(record.competitor_code, record.competitor_name.clone());
        self.competitor_teams.insert(record.competitor_name, record.team);
        Ok(())
    }

    /// File every usable row of one results table, skipping malformed rows.
    /// Returns the number of rows recorded.
    pub fn record_rows(&mut self, index: usize, rows: Vec<RawRow>) -> usize {
        let mut recorded = 0;
        for raw in rows {
            let outcome = EventRecord::try_from(raw)
                .map_err(|defect| SeasonError::MalformedRow {
                    index,
                    reason: defect.to_string(),
                })
                .and_then(|record| self.record(index, record));
            match outcome {
                Ok(()) => recorded += 1,
                Err(e) => warn!(event = index, error = %e, "Skipping result row"),
            }
        }
        recorded
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&LedgerKey, &LedgerBucket)> {
        self.buckets.iter().map(|(k, b)| (k, b))
    }

    pub fn bucket(&self, key: &LedgerKey) -> Option<&LedgerBucket> {
        self.index.get(key).map(|&i| &self.buckets[i].1)
    }

    /// Competitor code -> full name
    pub fn competitor_names(&self) -> &BTreeMap<String, String> {
        &self.competitor_names
    }

    /// Competitor name -> team as last scraped
    pub fn competitor_teams(&self) -> &BTreeMap<String, String> {
        &self.competitor_teams
    }
}

/// Build the season ledger from per-event rows in schedule order.
///
/// `events[i]` is recorded at index `i`. Short-format rows are ignored unless
/// `include_secondary` is set for the season.
pub fn build_ledger(events: Vec<EventRows>, include_secondary: bool) -> Ledger {
    let mut ledger = Ledger::new(events.len());
    for (index, rows) in events.into_iter().enumerate() {
        let primary = ledger.record_rows(index, rows.primary);
        let secondary = match rows.secondary {
            Some(secondary) if include_secondary => ledger.record_rows(index, secondary),
            _ => 0,
        };
        debug!(event = index, primary, secondary, "Event recorded");
    }
    ledger
}
