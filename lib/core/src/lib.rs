//! Core domain types and utilities for the campus-hub platform.
//!
//! This crate provides the foundational ID types and error handling shared
//! by the rest of the campus-hub student-community platform.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{CategoryId, CommentId, EventId, GroupId, ParseIdError, PostId, UserId};
