//! Typed client for the campus-hub community backend REST API.
//!
//! The community backend owns every durable domain entity: posts, comments,
//! categories, groups, group members, and user profiles. This crate holds
//! only the client-side type shapes and a thin request layer; nothing is
//! cached or stored locally.
//!
//! Every operation takes the caller's access token and forwards it as
//! `Authorization: Bearer <token>`.

pub mod client;
pub mod error;
pub mod models;

pub use client::BackendClient;
pub use error::BackendError;
pub use models::{
    Category, Comment, Group, GroupMember, MembershipRole, NewComment, NewPost, Page, Post,
    Preferences, ProfileUpdate, PostUpdate, UserProfile, UserSummary,
};
