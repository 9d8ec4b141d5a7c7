//! Public-holidays API client.
//!
//! The holidays API is queried per calendar year (`/{year}/{country}`), so a
//! range spanning a year boundary issues one request per year and the
//! results are filtered back down to the requested range.

use campus_hub_core::EventId;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::error::ScheduleError;
use crate::event::{CalendarEvent, EventKind, EventSource};

/// Source name used in errors and logs.
const SOURCE_NAME: &str = "holidays";

/// Wire format of one holiday entry.
#[derive(Debug, Deserialize)]
struct HolidayRow {
    date: NaiveDate,
    /// Name in the country's own language.
    #[serde(rename = "localName")]
    local_name: String,
    /// English name, kept as a fallback.
    name: String,
}

/// Client for the public-holidays API.
#[derive(Debug, Clone)]
pub struct HolidayClient {
    http: reqwest::Client,
    base_url: String,
    country: String,
}

impl HolidayClient {
    /// Creates a holiday client for the given base URL and country code.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        country: impl Into<String>,
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
            country: country.into(),
        })
    }

    /// Fetches public holidays within the given date range as all-day events.
    ///
    /// # Errors
    ///
    /// Returns an error when the range is reversed or any year's fetch fails.
    pub async fn events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CalendarEvent>, ScheduleError> {
        if start > end {
            return Err(ScheduleError::InvalidRange { start, end });
        }

        let mut events = Vec::new();
        for year in start.year()..=end.year() {
            let rows = self.fetch_year(year).await?;
            events.extend(
                rows.into_iter()
                    .filter(|row| row.date >= start && row.date <= end)
                    .map(holiday_event),
            );
        }

        Ok(events)
    }

    async fn fetch_year(&self, year: i32) -> Result<Vec<HolidayRow>, ScheduleError> {
        let url = format!("{}/{}/{}", self.base_url, year, self.country);

        let response = self
            .http
            .get(url)
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
                reason: format!("status {status} for {year}"),
            });
        }

        response.json().await.map_err(|e| ScheduleError::Decode {
            source_name: SOURCE_NAME.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Maps one holiday entry to an all-day calendar event.
fn holiday_event(row: HolidayRow) -> CalendarEvent {
    let title = if row.local_name.is_empty() {
        row.name
    } else {
        row.local_name
    };

    let start = Utc
        .from_utc_datetime(&row.date.and_hms_opt(0, 0, 0).expect("midnight exists"));

    CalendarEvent {
        id: EventId::new(),
        title,
        location: None,
        start,
        end: start + chrono::Duration::days(1),
        all_day: true,
        kind: EventKind::Holiday,
        source: EventSource::Holidays,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, local_name: &str, name: &str) -> HolidayRow {
        HolidayRow {
            date: date.parse().expect("date"),
            local_name: local_name.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn holiday_event_is_all_day() {
        let event = holiday_event(row("2025-03-01", "삼일절", "Independence Movement Day"));

        assert_eq!(event.title, "삼일절");
        assert!(event.all_day);
        assert_eq!(event.kind, EventKind::Holiday);
        assert_eq!(event.source, EventSource::Holidays);
        assert_eq!(event.start.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert_eq!(event.end - event.start, chrono::Duration::days(1));
    }

    #[test]
    fn holiday_event_falls_back_to_english_name() {
        let event = holiday_event(row("2025-01-01", "", "New Year's Day"));
        assert_eq!(event.title, "New Year's Day");
    }

    #[test]
    fn holiday_row_deserializes_wire_format() {
        let json = r#"{
            "date": "2025-05-05",
            "localName": "어린이날",
            "name": "Children's Day",
            "countryCode": "KR",
            "global": true
        }"#;

        let parsed: HolidayRow = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.date.to_string(), "2025-05-05");
        assert_eq!(parsed.local_name, "어린이날");
    }

    #[tokio::test]
    async fn reversed_range_is_rejected_before_any_request() {
        let client = HolidayClient::new(
            "http://192.0.2.1:9/holidays",
            "KR",
            std::time::Duration::from_millis(100),
        )
        .expect("client");

        let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");

        let err = client.events(start, end).await.expect_err("should fail");
        assert_eq!(err, ScheduleError::InvalidRange { start, end });
    }
}
