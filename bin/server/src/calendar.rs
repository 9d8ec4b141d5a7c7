//! Calendar route: merged university schedule and public holidays.

use axum::{
    Json,
    extract::{Query, State},
};
use campus_hub_schedule::{CalendarEvent, merge_events};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{AppState, RequireAuth};
use crate::error::ApiError;

/// Query parameters for the calendar range.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Inclusive range start (YYYY-MM-DD).
    pub start: NaiveDate,
    /// Inclusive range end (YYYY-MM-DD).
    pub end: NaiveDate,
}

/// `GET /api/calendar?start=&end=`
///
/// Both sources are fetched concurrently; one failing source fails the
/// request rather than returning a silently partial calendar.
pub async fn calendar(
    State(state): State<Arc<AppState>>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError> {
    if query.start > query.end {
        return Err(ApiError::InvalidRequest(format!(
            "start {} is after end {}",
            query.start, query.end
        )));
    }

    let (timetable, holidays) = tokio::try_join!(
        state.timetable.events(query.start, query.end),
        state.holidays.events(query.start, query.end),
    )?;

    Ok(Json(merge_events(timetable, holidays)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_query_parses_iso_dates() {
        let query: CalendarQuery =
            serde_json::from_str(r#"{ "start": "2025-03-01", "end": "2025-03-31" }"#)
                .expect("deserialize");
        assert_eq!(query.start.to_string(), "2025-03-01");
        assert_eq!(query.end.to_string(), "2025-03-31");
    }
}
