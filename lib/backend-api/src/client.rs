//! HTTP client for the community backend.

use campus_hub_core::{CategoryId, CommentId, GroupId, PostId, UserId};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::BackendError;
use crate::models::{
    Category, Comment, Group, GroupMember, NewComment, NewPost, Page, Post, PostUpdate,
    ProfileUpdate, UserProfile,
};

/// Client for the community backend REST API.
///
/// Holds a connection pool and the configured base URL. Cloning is cheap;
/// the underlying pool is shared.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a backend client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes a JSON body.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            // Failed responses are not trusted to carry JSON.
            tracing::debug!(%status, "Backend returned non-success status");
            return Err(BackendError::from_status(status.as_u16()));
        }

        response.json().await.map_err(|e| BackendError::Decode {
            reason: e.to_string(),
        })
    }

    /// Sends a request and discards the body.
    async fn execute(&self, request: RequestBuilder) -> Result<(), BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "Backend returned non-success status");
            return Err(BackendError::from_status(status.as_u16()));
        }

        Ok(())
    }

    // --- Posts ---

    /// Lists posts, optionally filtered by category, one page at a time.
    pub async fn list_posts(
        &self,
        token: &str,
        category: Option<CategoryId>,
        page: Option<u32>,
    ) -> Result<Page<Post>, BackendError> {
        let mut request = self.http.get(self.url("/posts")).bearer_auth(token);
        if let Some(category) = category {
            request = request.query(&[("category", category.as_ulid().to_string())]);
        }
        if let Some(page) = page {
            request = request.query(&[("page", page.to_string())]);
        }
        self.fetch(request).await
    }

    /// Fetches a single post.
    pub async fn get_post(&self, token: &str, id: PostId) -> Result<Post, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/posts/{}", id.as_ulid())))
            .bearer_auth(token);
        self.fetch(request).await
    }

    /// Creates a post authored by the caller.
    pub async fn create_post(&self, token: &str, new_post: &NewPost) -> Result<Post, BackendError> {
        let request = self
            .http
            .post(self.url("/posts"))
            .bearer_auth(token)
            .json(new_post);
        self.fetch(request).await
    }

    /// Updates a post. The backend enforces authorship.
    pub async fn update_post(
        &self,
        token: &str,
        id: PostId,
        update: &PostUpdate,
    ) -> Result<Post, BackendError> {
        let request = self
            .http
            .put(self.url(&format!("/posts/{}", id.as_ulid())))
            .bearer_auth(token)
            .json(update);
        self.fetch(request).await
    }

    /// Deletes a post. The backend enforces authorship.
    pub async fn delete_post(&self, token: &str, id: PostId) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.url(&format!("/posts/{}", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    // --- Likes ---

    /// Records the caller's like on a post.
    pub async fn like_post(&self, token: &str, id: PostId) -> Result<(), BackendError> {
        let request = self
            .http
            .post(self.url(&format!("/posts/{}/like", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    /// Removes the caller's like from a post.
    pub async fn unlike_post(&self, token: &str, id: PostId) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.url(&format!("/posts/{}/like", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    // --- Comments ---

    /// Lists the comments on a post.
    pub async fn list_comments(
        &self,
        token: &str,
        post: PostId,
    ) -> Result<Vec<Comment>, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/posts/{}/comments", post.as_ulid())))
            .bearer_auth(token);
        self.fetch(request).await
    }

    /// Creates a comment on a post.
    pub async fn create_comment(
        &self,
        token: &str,
        post: PostId,
        new_comment: &NewComment,
    ) -> Result<Comment, BackendError> {
        let request = self
            .http
            .post(self.url(&format!("/posts/{}/comments", post.as_ulid())))
            .bearer_auth(token)
            .json(new_comment);
        self.fetch(request).await
    }

    /// Deletes a comment. The backend enforces authorship.
    pub async fn delete_comment(&self, token: &str, id: CommentId) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.url(&format!("/comments/{}", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    // --- Categories ---

    /// Lists all forum categories.
    pub async fn list_categories(&self, token: &str) -> Result<Vec<Category>, BackendError> {
        let request = self.http.get(self.url("/categories")).bearer_auth(token);
        self.fetch(request).await
    }

    // --- Groups ---

    /// Lists all student groups.
    pub async fn list_groups(&self, token: &str) -> Result<Vec<Group>, BackendError> {
        let request = self.http.get(self.url("/groups")).bearer_auth(token);
        self.fetch(request).await
    }

    /// Fetches a single group.
    pub async fn get_group(&self, token: &str, id: GroupId) -> Result<Group, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/groups/{}", id.as_ulid())))
            .bearer_auth(token);
        self.fetch(request).await
    }

    /// Adds the caller to a group.
    pub async fn join_group(&self, token: &str, id: GroupId) -> Result<(), BackendError> {
        let request = self
            .http
            .post(self.url(&format!("/groups/{}/members", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    /// Removes the caller from a group.
    pub async fn leave_group(&self, token: &str, id: GroupId) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.url(&format!("/groups/{}/members", id.as_ulid())))
            .bearer_auth(token);
        self.execute(request).await
    }

    /// Lists the members of a group.
    pub async fn list_group_members(
        &self,
        token: &str,
        id: GroupId,
    ) -> Result<Vec<GroupMember>, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/groups/{}/members", id.as_ulid())))
            .bearer_auth(token);
        self.fetch(request).await
    }

    // --- Users ---

    /// Fetches the caller's own profile.
    pub async fn current_profile(&self, token: &str) -> Result<UserProfile, BackendError> {
        let request = self.http.get(self.url("/users/me")).bearer_auth(token);
        self.fetch(request).await
    }

    /// Fetches another user's profile.
    pub async fn get_profile(&self, token: &str, id: UserId) -> Result<UserProfile, BackendError> {
        let request = self
            .http
            .get(self.url(&format!("/users/{}", id.as_ulid())))
            .bearer_auth(token);
        self.fetch(request).await
    }

    /// Updates the caller's profile and preferences.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, BackendError> {
        let request = self
            .http
            .put(self.url("/users/me"))
            .bearer_auth(token)
            .json(update);
        self.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = BackendClient::new("https://api.example.com/", Duration::from_secs(5))
            .expect("client");
        assert_eq!(client.url("/posts"), "https://api.example.com/posts");
    }

    #[test]
    fn url_joins_nested_paths() {
        let client =
            BackendClient::new("https://api.example.com", Duration::from_secs(5)).expect("client");
        let id = PostId::new();
        assert_eq!(
            client.url(&format!("/posts/{id}/comments")),
            format!("https://api.example.com/posts/{id}/comments")
        );
    }

    #[tokio::test]
    async fn transport_error_on_unreachable_backend() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let client = BackendClient::new("http://192.0.2.1:9", Duration::from_millis(200))
            .expect("client");

        let err = client
            .list_categories("token")
            .await
            .expect_err("should fail");
        assert!(matches!(err, BackendError::Transport { .. }));
    }
}
