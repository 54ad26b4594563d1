use serde::{Deserialize, Serialize};

/// Path fragment identifying a primary race results page
const PRIMARY_MARKER: &str = "race-result";

/// Path fragment identifying the matching sprint results page
const SECONDARY_MARKER: &str = "sprint-results";

/// One scheduled event: a display label plus the reference the row extractor
/// uses to fetch its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub location: String,
    pub reference: String,
}

impl ScheduledEvent {
    pub fn new(location: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reference: reference.into(),
        }
    }

    pub fn secondary_reference(&self) -> Option<String> {
        secondary_reference(&self.reference)
    }
}

/// The ordered events of one season. An event's position in `events` is its
/// index in every per-event array built for the season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSchedule {
    pub year: u16,
    pub events: Vec<ScheduledEvent>,
}

impl SeasonSchedule {
    pub fn new(year: u16, events: Vec<ScheduledEvent>) -> Self {
        Self { year, events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn locations(&self) -> Vec<String> {
        self.events.iter().map(|e| e.location.clone()).collect()
    }
}

/// Derive the short-format (sprint) event reference from a primary race
/// reference by substituting `race-result` with `sprint-results`.
pub fn secondary_reference(reference: &str) -> Option<String> {
    if reference.contains(PRIMARY_MARKER) {
        Some(reference.replace(PRIMARY_MARKER, SECONDARY_MARKER))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_reference() {
        assert_eq!(
            secondary_reference("races/1229/bahrain/race-result").as_deref(),
            Some("races/1229/bahrain/sprint-results")
        );
        assert_eq!(secondary_reference("races/1229/bahrain/qualifying"), None);
    }

    #[test]
    fn test_locations_follow_schedule_order() {
        let schedule = SeasonSchedule::new(
            2024,
            vec![
                ScheduledEvent::new("Bahrain", "races/1/bahrain/race-result"),
                ScheduledEvent::new("Saudi Arabia", "races/2/saudi-arabia/race-result"),
            ],
        );
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.locations(), vec!["Bahrain", "Saudi Arabia"]);
        assert_eq!(
            schedule.events[1].secondary_reference().as_deref(),
            Some("races/2/saudi-arabia/sprint-results")
        );
    }
}
