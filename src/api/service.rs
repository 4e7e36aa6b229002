//! Core trait for the remote post service.

use async_trait::async_trait;

use super::error::ApiError;
use crate::post::{Post, PostBody};

/// CRUD contract of the post backend.
///
/// The store owns one implementation behind an `Arc` and calls it from
/// spawned tasks, so implementations must be `Send + Sync`. Cancellation is
/// handled by the caller dropping the returned future.
#[async_trait]
pub trait PostService: Send + Sync {
    /// `GET /posts`
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `POST /posts`, returns the created post with its new id.
    async fn add_post(&self, body: &PostBody) -> Result<Post, ApiError>;

    /// `PUT /posts/{post_id}` with the full replacement post.
    async fn update_post(&self, post_id: &str, body: &Post) -> Result<Post, ApiError>;

    /// `DELETE /posts/{post_id}`.
    ///
    /// Returns the raw response body. Callers must not rely on it to
    /// identify the deleted post.
    async fn delete_post(&self, post_id: &str) -> Result<serde_json::Value, ApiError>;
}
