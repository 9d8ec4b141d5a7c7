//! University schedule API client.
//!
//! The schedule API returns flat rows for a date range; each row becomes one
//! calendar event. Rows with timestamps the API mangled (a known occurrence
//! around semester rollover) are skipped with a warning rather than failing
//! the whole calendar.

use campus_hub_core::EventId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::ScheduleError;
use crate::event::{CalendarEvent, EventKind, EventSource};

/// Source name used in errors and logs.
const SOURCE_NAME: &str = "timetable";

/// Wire format of one schedule row.
#[derive(Debug, Deserialize)]
struct TimetableRow {
    subject: String,
    room: Option<String>,
    start: String,
    end: String,
    #[serde(rename = "type")]
    entry_type: Option<String>,
}

/// Client for the university schedule API.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: String,
}

impl TimetableClient {
    /// Creates a timetable client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScheduleError::Fetch {
                source_name: SOURCE_NAME.to_string(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches schedule entries for the given date range as calendar events.
    ///
    /// # Errors
    ///
    /// Returns an error when the range is reversed, the API is unreachable,
    /// or the response shape is unrecognizable. Individual malformed rows
    /// are skipped, not fatal.
    pub async fn events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, ScheduleError> {
        if start > end {
            return Err(ScheduleError::InvalidRange { start, end });
        }

        let response = self
            .http
            .get(self.base_url.as_str())
            .query(&[("from", start.to_string()), ("to", end.to_string())])
            .send()
            .await
            .map_err(|e| ScheduleError::Fetch {
                source_name: SOURCE_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::Fetch {
                source_name: SOURCE_NAME.to_string(),
                reason: format!("status {status}"),
            });
        }

        let rows: Vec<TimetableRow> =
            response.json().await.map_err(|e| ScheduleError::Decode {
                source_name: SOURCE_NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(rows.into_iter().filter_map(map_row).collect())
    }
}

/// Maps one schedule row to a calendar event.
///
/// Returns `None` (with a warning) when timestamps are unparseable.
fn map_row(row: TimetableRow) -> Option<CalendarEvent> {
    let start = parse_timestamp(&row.start)?;
    let end = parse_timestamp(&row.end)?;

    let kind = match row.entry_type.as_deref() {
        Some("lecture") => EventKind::Lecture,
        Some("exam") => EventKind::Exam,
        Some("reservation") => EventKind::Reservation,
        _ => EventKind::Other,
    };

    Some(CalendarEvent {
        id: EventId::new(),
        title: row.subject,
        location: row.room,
        start,
        end,
        all_day: false,
        kind,
        source: EventSource::Timetable,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(timestamp = raw, error = %e, "Skipping schedule row with bad timestamp");
            None
        }
    }
}
