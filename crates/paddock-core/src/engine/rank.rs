use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{PerEntitySeries, RankedEntry};

/// Order entities by final cumulative total, highest first. Equal totals are
/// ordered by name so the ranking never depends on map iteration order.
pub fn rank(series: BTreeMap<String, PerEntitySeries>) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = series
        .into_iter()
        .map(|(name, series)| RankedEntry { name, series })
        .collect();
    ranked.sort_by(compare_entries);
    ranked
}

fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.series
        .total()
        .total_cmp(&a.series.total())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Points;

    fn series(deltas: &[u32]) -> PerEntitySeries {
        PerEntitySeries::from_deltas(deltas.iter().copied().map(Points::from).collect())
    }

    #[test]
    fn test_rank_by_final_total() {
        let mut map = BTreeMap::new();
        map.insert("Alonso".to_string(), series(&[25, 0]));
        map.insert("Button".to_string(), series(&[0, 26]));
        map.insert("Coulthard".to_string(), series(&[1, 1]));

        let names: Vec<_> = rank(map).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Button", "Alonso", "Coulthard"]);
    }

    #[test]
    fn test_ties_break_by_name() {
        let mut map = BTreeMap::new();
        map.insert("Zonta".to_string(), series(&[0, 0]));
        map.insert("Barrichello".to_string(), series(&[10, 0]));
        map.insert("Alesi".to_string(), series(&[0, 0]));
        map.insert("Fisichella".to_string(), series(&[5, 5]));

        let names: Vec<_> = rank(map).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Barrichello", "Fisichella", "Alesi", "Zonta"]);
    }
}
