//! Calendar aggregation for campus-hub.
//!
//! The calendar shown to students is assembled from two external sources:
//! - the university schedule API (lectures, exams, room reservations)
//! - a public-holidays API
//!
//! This crate provides a client for each source and the merge that produces
//! one chronologically ordered event list. Nothing is cached; the calendar
//! is fetched per request.

pub mod error;
pub mod event;
pub mod holidays;
pub mod timetable;

pub use error::ScheduleError;
pub use event::{CalendarEvent, EventKind, EventSource, merge_events};
pub use holidays::HolidayClient;
pub use timetable::TimetableClient;
