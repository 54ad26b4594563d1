use serde::{Deserialize, Serialize};

use super::Points;

/// Length of a competitor code ("VER", "HAM", ...).
pub const COMPETITOR_CODE_LEN: usize = 3;

/// One row of an event's results table exactly as the extractor read it.
///
/// Every field is optional because the source table is not guaranteed to be
/// complete; `EventRecord::try_from` decides whether the row is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub position: Option<String>,
    pub car_number: Option<String>,
    pub competitor_name: Option<String>,
    pub competitor_code: Option<String>,
    pub team: Option<String>,
    pub laps: Option<String>,
    pub time: Option<String>,
    pub points: Option<String>,
}

/// A validated result for one competitor in one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Finishing position. Not necessarily numeric ("NC", "DQ", "DNF").
    pub position: String,
    pub competitor_name: String,
    pub competitor_code: String,
    /// Team name as scraped, sponsor tokens included.
    pub team: String,
    pub points: Points,
}

/// Why a raw row could not become an `EventRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    Missing(&'static str),
    BadCode(String),
    BadPoints(String),
}

impl std::fmt::Display for RowDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowDefect::Missing(field) => write!(f, "missing {}", field),
            RowDefect::BadCode(code) => write!(f, "competitor code {:?} is not {} characters", code, COMPETITOR_CODE_LEN),
            RowDefect::BadPoints(pts) => write!(f, "unparseable points {:?}", pts),
        }
    }
}

/// Trimmed, non-empty field value
fn required(value: Option<String>, field: &'static str) -> Result<String, RowDefect> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(RowDefect::Missing(field))
}

impl TryFrom<RawRow> for EventRecord {
    type Error = RowDefect;

    fn try_from(row: RawRow) -> Result<Self, Self::Error> {
        let competitor_code = required(row.competitor_code, "competitor code")?;
        if competitor_code.chars().count() != COMPETITOR_CODE_LEN {
            return Err(RowDefect::BadCode(competitor_code));
        }
        let competitor_name = required(row.competitor_name, "competitor name")?;
        let team = required(row.team, "team")?;
        let raw_points = required(row.points, "points")?;
        let points = raw_points
            .parse::<Points>()
            .map_err(|_| RowDefect::BadPoints(raw_points))?;

        Ok(Self {
            position: row.position.map(|p| p.trim().to_string()).unwrap_or_default(),
            competitor_name,
            competitor_code,
            team,
            points,
        })
    }
}

/// Split a results-table driver cell such as `"Max VerstappenVER"` into the
/// full name and the trailing three-letter code.
pub fn split_driver_cell(cell: &str) -> Option<(String, String)> {
    let cell = cell.trim();
    let chars: Vec<char> = cell.chars().collect();
    if chars.len() <= COMPETITOR_CODE_LEN {
        return None;
    }
    let split_at = chars.len() - COMPETITOR_CODE_LEN;
    let name: String = chars[..split_at].iter().collect();
    let code: String = chars[split_at..].iter().collect();
    let name = name.trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some((name, code))
}
