//! Error types for the schedule crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ScheduleError`: failures fetching or interpreting calendar sources

use chrono::NaiveDate;
use std::fmt;

/// Errors from calendar-source operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A source could not be reached or answered with an error.
    Fetch { source_name: String, reason: String },
    /// A source's response did not match the expected shape.
    Decode { source_name: String, reason: String },
    /// The requested range is reversed.
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch {
                source_name,
                reason,
            } => {
                write!(f, "failed to fetch from '{source_name}': {reason}")
            }
            Self::Decode {
                source_name,
                reason,
            } => {
                write!(f, "failed to decode '{source_name}' response: {reason}")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range: {start} is after {end}")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_source() {
        let err = ScheduleError::Fetch {
            source_name: "timetable".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("timetable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn invalid_range_display() {
        let err = ScheduleError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
            end: NaiveDate::from_ymd_opt(2025, 5, 1).expect("date"),
        };
        assert!(err.to_string().contains("2025-06-01"));
        assert!(err.to_string().contains("2025-05-01"));
    }
}
