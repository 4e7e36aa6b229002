use serde::Serialize;

use crate::mvi::StoreState;
use crate::post::Post;

/// Snapshot of the blog slice.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BlogState {
    /// Posts in display order.
    pub posts: Vec<Post>,
    /// Post currently open in the editor. Not cleared when the post is
    /// deleted, so it can outlive its entry in `posts`.
    pub editing_post: Option<Post>,
    /// True iff the most recently applied async phase was `Pending`.
    /// Overlapping requests clear it as soon as any one of them settles.
    pub loading: bool,
    /// Requests whose pending phase was applied but which have not settled.
    pub in_flight: usize,
}

impl StoreState for BlogState {}

impl BlogState {
    pub fn find_post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing_post.is_some()
    }

    /// Whether any request is still outstanding, regardless of `loading`.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}
