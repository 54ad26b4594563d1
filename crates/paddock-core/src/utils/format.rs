use crate::models::Points;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Points behind the leader, or "-" for the leader itself
pub fn format_gap(leader: Points, total: Points) -> String {
    if total >= leader {
        "-".to_string()
    } else {
        format!("-{}", leader - total)
    }
}

/// Format the labels of events counted as empty, e.g. "3 (Monaco), 7 (Spa)"
pub fn format_missing_events(locations: &[String], missing: &[usize]) -> String {
    missing
        .iter()
        .map(|&index| match locations.get(index) {
            Some(location) => format!("{} ({})", index + 1, location),
            None => (index + 1).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Ferrari", 10), "Ferrari");
        assert_eq!(truncate_string("Red Bull Racing", 8), "Red B...");
        assert_eq!(truncate_string("RB", 2), "RB");
        assert_eq!(truncate_string("Räikkönen", 9), "Räikkönen");
    }

    #[test]
    fn test_format_gap() {
        let leader = Points::from(437);
        assert_eq!(format_gap(leader, leader), "-");
        assert_eq!(format_gap(leader, Points::from(374)), "-63");
        let half: Points = "0.5".parse().unwrap();
        assert_eq!(format_gap(Points::from(1), half), "-0.5");
    }

    #[test]
    fn test_format_missing_events() {
        let locations = vec!["Bahrain".to_string(), "Jeddah".to_string()];
        assert_eq!(format_missing_events(&locations, &[1]), "2 (Jeddah)");
        assert_eq!(format_missing_events(&locations, &[0, 5]), "1 (Bahrain), 6");
        assert_eq!(format_missing_events(&locations, &[]), "");
    }
}
