//! Client-side shapes for community backend entities.
//!
//! These types mirror the backend's wire format. They are fetched
//! per-request and held only in transient state; the backend remains the
//! source of truth.

use campus_hub_core::{CategoryId, CommentId, GroupId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Paged response envelope used by the backend's list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Page size the backend applied.
    pub per_page: u32,
    /// Total item count across all pages.
    pub total: u64,
}

/// Minimal author embed used wherever an entity references a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
}

/// A forum post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub category_id: CategoryId,
    pub author: UserSummary,
    pub title: String,
    pub body: String,
    pub like_count: u64,
    /// Whether the requesting user has liked this post.
    #[serde(default)]
    pub liked_by_caller: bool,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub category_id: CategoryId,
    pub title: String,
    pub body: String,
}

/// Payload for updating a post. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: UserSummary,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub body: String,
}

/// A forum category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub post_count: u64,
}

/// A student group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub member_count: u64,
    /// Whether the requesting user is a member.
    #[serde(default)]
    pub joined_by_caller: bool,
}

/// Membership role within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    /// Ordinary member.
    Member,
    /// Group owner with management rights on the backend.
    Owner,
}

/// A group membership record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: GroupId,
    pub user: UserSummary,
    pub role: MembershipRole,
    pub joined_at: DateTime<Utc>,
}

/// Notification and display preferences stored on the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Email notifications for replies to the user's posts.
    #[serde(default)]
    pub notify_on_reply: bool,
    /// Email notifications for group announcements.
    #[serde(default)]
    pub notify_on_group_post: bool,
    /// Preferred UI language tag (e.g., "ko", "en").
    #[serde(default)]
    pub language: Option<String>,
}

/// A user profile as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for updating the caller's profile. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}
