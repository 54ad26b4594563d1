//! Fold ledger buckets into per-competitor and per-team series.

use std::collections::BTreeMap;

use tracing::warn;

use super::ledger::Ledger;
use crate::models::{PerEntitySeries, Points};

/// A scraped team's series plus the events it fielded at least one entry in.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamTally {
    pub series: PerEntitySeries,
    pub entered: Vec<bool>,
}

/// Unranked season series, keyed by competitor name and by team as scraped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub competitors: BTreeMap<String, PerEntitySeries>,
    pub teams: BTreeMap<String, TeamTally>,
}

/// Compute delta and cumulative series for every competitor and team.
///
/// Absent events count as zero. A competitor is credited at most once per
/// event: when a second team bucket also holds points for them at an index
/// where they already scored, the later value is credited to neither the
/// competitor nor that team.
pub fn aggregate(ledger: &Ledger) -> Aggregation {
    let event_count = ledger.event_count();
    let mut competitor_deltas: BTreeMap<String, Vec<Option<Points>>> = BTreeMap::new();
    let mut team_deltas: BTreeMap<String, (Vec<Points>, Vec<bool>)> = BTreeMap::new();

    for (key, bucket) in ledger.buckets() {
        let competitor = ledger
            .competitor_names()
            .get(&key.competitor_code)
            .cloned()
            .unwrap_or_else(|| key.competitor_code.clone());

        let competitor_row = competitor_deltas
            .entry(competitor.clone())
            .or_insert_with(|| vec![None; event_count]);
        let (team_row, entered) = team_deltas
            .entry(key.team.clone())
            .or_insert_with(|| (vec![Points::ZERO; event_count], vec![false; event_count]));

        for (index, slot) in bucket.slots().iter().enumerate() {
            let Some(points) = slot.points() else {
                continue;
            };

            match competitor_row[index] {
                Some(existing) if !existing.is_zero() => {
                    warn!(
                        competitor = %competitor,
                        team = %key.team,
                        event = index,
                        kept = %existing,
                        ignored = %points,
                        "Competitor already scored for another team in this event"
                    );
                    continue;
                }
                _ => competitor_row[index] = Some(points),
            }

            team_row[index] += points;
            entered[index] = true;
        }
    }

    let competitors = competitor_deltas
        .into_iter()
        .map(|(name, deltas)| {
            let deltas = deltas.into_iter().map(Option::unwrap_or_default).collect();
            (name, PerEntitySeries::from_deltas(deltas))
        })
        .collect();

    let teams = team_deltas
        .into_iter()
        .map(|(team, (deltas, entered))| {
            let tally = TeamTally {
                series: PerEntitySeries::from_deltas(deltas),
                entered,
            };
            (team, tally)
        })
        .collect();

    Aggregation { competitors, teams }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ledger::{build_ledger, EventRows};
    use crate::models::RawRow;

    fn raw(code: &str, name: &str, team: &str, pts: &str) -> RawRow {
        RawRow {
            position: Some("1".to_string()),
            competitor_code: Some(code.to_string()),
            competitor_name: Some(name.to_string()),
            team: Some(team.to_string()),
            points: Some(pts.to_string()),
            ..RawRow::default()
        }
    }

    fn event(rows: Vec<RawRow>) -> EventRows {
        EventRows {
            primary: rows,
            secondary: None,
        }
    }

    fn pts(values: &[u32]) -> Vec<Points> {
        values.iter().copied().map(Points::from).collect()
    }

    #[test]
    fn test_absent_event_counts_as_zero() {
        let ledger = build_ledger(
            vec![
                event(vec![raw("LEC", "Charles Leclerc", "Ferrari", "25")]),
                event(vec![]),
                event(vec![raw("LEC", "Charles Leclerc", "Ferrari", "12")]),
            ],
            false,
        );
        let agg = aggregate(&ledger);
        let lec = &agg.competitors["Charles Leclerc"];
        assert_eq!(lec.delta, pts(&[25, 0, 12]));
        assert_eq!(lec.cumulative, pts(&[25, 25, 37]));
        assert_eq!(agg.teams["Ferrari"].entered, vec![true, false, true]);
    }

    #[test]
    fn test_sprint_points_sum_into_delta() {
        let ledger = build_ledger(
            vec![EventRows {
                primary: vec![raw("VER", "Max Verstappen", "Red Bull Racing", "25")],
                secondary: Some(vec![raw("VER", "Max Verstappen", "Red Bull Racing", "6")]),
            }],
            true,
        );
        let agg = aggregate(&ledger);
        assert_eq!(agg.competitors["Max Verstappen"].delta, pts(&[31]));
        assert_eq!(agg.teams["Red Bull Racing"].series.delta, pts(&[31]));
    }

    #[test]
    fn test_team_sums_its_competitors() {
        let ledger = build_ledger(
            vec![event(vec![
                raw("HAM", "Lewis Hamilton", "Mercedes", "18"),
                raw("RUS", "George Russell", "Mercedes", "15"),
            ])],
            false,
        );
        let agg = aggregate(&ledger);
        assert_eq!(agg.teams["Mercedes"].series.delta, pts(&[33]));
        assert_eq!(agg.competitors.len(), 2);
    }

    #[test]
    fn test_team_change_merges_competitor_splits_team() {
        let ledger = build_ledger(
            vec![
                event(vec![raw("LAW", "Liam Lawson", "Red Bull Racing", "2")]),
                event(vec![raw("LAW", "Liam Lawson", "Racing Bulls", "4")]),
            ],
            false,
        );
        let agg = aggregate(&ledger);
        assert_eq!(agg.competitors["Liam Lawson"].delta, pts(&[2, 4]));
        assert_eq!(agg.teams["Red Bull Racing"].series.delta, pts(&[2, 0]));
        assert_eq!(agg.teams["Racing Bulls"].series.delta, pts(&[0, 4]));
    }

    #[test]
    fn test_competitor_not_double_credited_across_teams() {
        let ledger = build_ledger(
            vec![event(vec![
                raw("LAW", "Liam Lawson", "Red Bull Racing", "8"),
                raw("LAW", "Liam Lawson", "Racing Bulls", "4"),
            ])],
            false,
        );
        let agg = aggregate(&ledger);
        assert_eq!(agg.competitors["Liam Lawson"].delta, pts(&[8]));
        assert_eq!(agg.teams["Red Bull Racing"].series.delta, pts(&[8]));
        assert_eq!(agg.teams["Racing Bulls"].series.delta, pts(&[0]));
        assert_eq!(agg.teams["Racing Bulls"].entered, vec![false]);
    }

    #[test]
    fn test_half_points_preserved() {
        let ledger = build_ledger(
            vec![
                event(vec![raw("HAM", "Lewis Hamilton", "Mercedes", "12.5")]),
                event(vec![raw("HAM", "Lewis Hamilton", "Mercedes", "0.5")]),
            ],
            false,
        );
        let series = &aggregate(&ledger).competitors["Lewis Hamilton"];
        assert_eq!(series.delta[0].to_string(), "12.5");
        assert_eq!(series.cumulative[1].to_string(), "13");
        assert!(series.cumulative[1].is_integral());
    }
}
