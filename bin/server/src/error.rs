//! Error types for API route handlers.
//!
//! Proxy handlers translate library errors into HTTP responses here; auth
//! routes carry their own error type in `auth::routes`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_hub_backend_api::BackendError;
use campus_hub_schedule::ScheduleError;

/// Errors surfaced by the API routes.
#[derive(Debug)]
pub enum ApiError {
    /// The community backend call failed.
    Backend(BackendError),
    /// A calendar source failed.
    Schedule(ScheduleError),
    /// The request itself was malformed.
    InvalidRequest(String),
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Backend(err) => backend_response(err),
            Self::Schedule(err) => schedule_response(err),
            Self::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}

/// Maps a backend error onto the proxied response.
///
/// Backend statuses pass through; failures that never produced a status
/// become 502 so the client can tell "backend said no" from "backend gone".
fn backend_response(err: BackendError) -> Response {
    match err.status() {
        Some(status) => {
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.to_string()).into_response()
        }
        None => {
            tracing::error!(error = %err, "Community backend unreachable");
            (StatusCode::BAD_GATEWAY, "Community backend unavailable").into_response()
        }
    }
}

fn schedule_response(err: ScheduleError) -> Response {
    match err {
        ScheduleError::InvalidRange { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        ScheduleError::Fetch { ref source_name, .. }
        | ScheduleError::Decode { ref source_name, .. } => {
            tracing::error!(source = %source_name, error = %err, "Calendar source failed");
            (
                StatusCode::BAD_GATEWAY,
                format!("Calendar source '{source_name}' unavailable"),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn backend_status_passes_through() {
        let response = ApiError::Backend(BackendError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_transport_maps_to_bad_gateway() {
        let response = ApiError::Backend(BackendError::Transport {
            reason: "connection refused".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_range_maps_to_bad_request() {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        let end = chrono::NaiveDate::from_ymd_opt(2025, 5, 1).expect("date");
        let response =
            ApiError::Schedule(ScheduleError::InvalidRange { start, end }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn schedule_fetch_maps_to_bad_gateway() {
        let response = ApiError::Schedule(ScheduleError::Fetch {
            source_name: "timetable".to_string(),
            reason: "status 500".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
