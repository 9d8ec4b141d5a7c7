//! Calendar event type and merge.

use campus_hub_core::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of event this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A scheduled lecture.
    Lecture,
    /// An exam sitting.
    Exam,
    /// A room or facility reservation.
    Reservation,
    /// A public holiday.
    Holiday,
    /// Anything the source did not classify.
    Other,
}

/// Which external source produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// The university schedule API.
    Timetable,
    /// The public-holidays API.
    Holidays,
}

/// One entry on the merged calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Identifier assigned at mapping time; stable only within one response.
    pub id: EventId,
    /// Event title shown to the user.
    pub title: String,
    /// Room or venue, when the source provides one.
    pub location: Option<String>,
    /// Event start.
    pub start: DateTime<Utc>,
    /// Event end.
    pub end: DateTime<Utc>,
    /// True for date-scoped events like holidays.
    pub all_day: bool,
    /// Event classification.
    pub kind: EventKind,
    /// Which source produced the event.
    pub source: EventSource,
}

/// Merges two event lists into one, ordered by start time.
///
/// The sort is stable: events with equal starts keep their relative order,
/// timetable entries before holidays when both lists are passed in that
/// order.
#[must_use]
pub fn merge_events(
    timetable: Vec<CalendarEvent>,
    holidays: Vec<CalendarEvent>,
) -> Vec<CalendarEvent> {
    let mut merged = timetable;
    merged.extend(holidays);
    merged.sort_by_key(|event| event.start);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_at(hour: u32, title: &str, source: EventSource) -> CalendarEvent {
        CalendarEvent {
            id: EventId::new(),
            title: title.to_string(),
            location: None,
            start: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 1, hour + 1, 0, 0).unwrap(),
            all_day: false,
            kind: EventKind::Lecture,
            source,
        }
    }

    #[test]
    fn merge_orders_by_start() {
        let timetable = vec![
            event_at(14, "Databases", EventSource::Timetable),
            event_at(9, "Algorithms", EventSource::Timetable),
        ];
        let holidays = vec![event_at(0, "Holiday", EventSource::Holidays)];

        let merged = merge_events(timetable, holidays);

        let titles: Vec<&str> = merged.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Holiday", "Algorithms", "Databases"]);
    }

    #[test]
    fn merge_is_stable_for_equal_starts() {
        let timetable = vec![event_at(9, "Lecture", EventSource::Timetable)];
        let holidays = vec![event_at(9, "Holiday", EventSource::Holidays)];

        let merged = merge_events(timetable, holidays);

        assert_eq!(merged[0].title, "Lecture");
        assert_eq!(merged[1].title, "Holiday");
    }

    #[test]
    fn merge_of_empty_lists_is_empty() {
        assert!(merge_events(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn event_serializes_with_snake_case_kinds() {
        let event = event_at(9, "Algorithms", EventSource::Timetable);
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("lecture"));
        assert_eq!(
            json.get("source").and_then(|v| v.as_str()),
            Some("timetable")
        );
    }
}
