//! Reducer for the blog slice.

use crate::mvi::Reducer;
use crate::post::Post;

use super::intent::{AsyncPhase, BlogIntent, PhaseKind};
use super::state::BlogState;

/// Reducer for blog state transitions.
pub struct BlogReducer;

impl Reducer for BlogReducer {
    type State = BlogState;
    type Intent = BlogIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let state = match intent.phase() {
            Some(kind) => apply_phase(state, kind),
            None => state,
        };

        match intent {
            BlogIntent::StartEditing { post_id } => {
                let editing_post = state.find_post(&post_id).cloned();
                BlogState {
                    editing_post,
                    ..state
                }
            }

            BlogIntent::CancelEditing => BlogState {
                editing_post: None,
                ..state
            },

            BlogIntent::GetPostList(AsyncPhase::Fulfilled { payload, .. }) => BlogState {
                posts: payload,
                ..state
            },

            BlogIntent::AddPost(AsyncPhase::Fulfilled { payload, .. }) => {
                let mut posts = state.posts;
                posts.push(payload);
                BlogState { posts, ..state }
            }

            BlogIntent::UpdatePost(AsyncPhase::Fulfilled { payload, .. }) => BlogState {
                posts: replace_post(state.posts, payload),
                editing_post: None,
                ..state
            },

            // The requested id is authoritative; the response body may not carry one.
            BlogIntent::DeletePost(AsyncPhase::Fulfilled { meta, .. }) => {
                let mut posts = state.posts;
                if let Some(index) = posts.iter().position(|post| post.id == meta.arg) {
                    posts.remove(index);
                }
                BlogState { posts, ..state }
            }

            // Pending and Rejected only touch the loading bookkeeping above.
            BlogIntent::GetPostList(_)
            | BlogIntent::AddPost(_)
            | BlogIntent::UpdatePost(_)
            | BlogIntent::DeletePost(_) => state,
        }
    }
}

/// Loading flag and in-flight counter, shared by every async intent.
fn apply_phase(state: BlogState, kind: PhaseKind) -> BlogState {
    match kind {
        PhaseKind::Pending => BlogState {
            loading: true,
            in_flight: state.in_flight + 1,
            ..state
        },
        PhaseKind::Fulfilled | PhaseKind::Rejected => BlogState {
            loading: false,
            in_flight: state.in_flight.saturating_sub(1),
            ..state
        },
    }
}

/// Replace the first post with the same id. Unknown ids are not appended.
fn replace_post(mut posts: Vec<Post>, updated: Post) -> Vec<Post> {
    if let Some(slot) = posts.iter_mut().find(|post| post.id == updated.id) {
        *slot = updated;
    }
    posts
}
