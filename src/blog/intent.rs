//! Intents for the blog slice.
//!
//! Synchronous intents carry their input directly. Asynchronous ones wrap an
//! [`AsyncPhase`], so every remote call is dispatched as `Pending` followed
//! by exactly one of `Fulfilled` or `Rejected`.

use thiserror::Error;
use uuid::Uuid;

use crate::mvi::Intent;
use crate::post::{Post, PostBody};

/// Identifies one asynchronous request and the argument it was started with.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta<A> {
    pub request_id: Uuid,
    pub arg: A,
}

impl<A> RequestMeta<A> {
    pub fn new(arg: A) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            arg,
        }
    }
}

/// Why an asynchronous request ended in the rejected phase.
///
/// Both variants have the same effect on state; they differ only for
/// the caller awaiting the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("request was cancelled")]
    Cancelled,

    #[error("remote call failed: {message}")]
    Remote {
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        message: String,
    },
}

impl RejectReason {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RejectReason::Cancelled)
    }
}

/// Phase of an asynchronous request.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncPhase<A, T> {
    Pending {
        meta: RequestMeta<A>,
    },
    Fulfilled {
        meta: RequestMeta<A>,
        payload: T,
    },
    Rejected {
        meta: RequestMeta<A>,
        reason: RejectReason,
    },
}

impl<A, T> AsyncPhase<A, T> {
    pub fn meta(&self) -> &RequestMeta<A> {
        match self {
            AsyncPhase::Pending { meta }
            | AsyncPhase::Fulfilled { meta, .. }
            | AsyncPhase::Rejected { meta, .. } => meta,
        }
    }

    pub fn kind(&self) -> PhaseKind {
        match self {
            AsyncPhase::Pending { .. } => PhaseKind::Pending,
            AsyncPhase::Fulfilled { .. } => PhaseKind::Fulfilled,
            AsyncPhase::Rejected { .. } => PhaseKind::Rejected,
        }
    }
}

/// Payload-free tag of an [`AsyncPhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Pending,
    Fulfilled,
    Rejected,
}

/// Argument of an update request: target id plus full replacement post.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePostArg {
    pub post_id: String,
    pub body: Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlogIntent {
    /// Open the post with this id in the editor (or clear if unknown).
    StartEditing { post_id: String },
    /// Close the editor.
    CancelEditing,
    GetPostList(AsyncPhase<(), Vec<Post>>),
    AddPost(AsyncPhase<PostBody, Post>),
    UpdatePost(AsyncPhase<UpdatePostArg, Post>),
    /// The fulfilled payload is the raw response body; it is not trusted
    /// to identify the deleted post.
    DeletePost(AsyncPhase<String, serde_json::Value>),
}

impl Intent for BlogIntent {}

impl BlogIntent {
    /// Stable action name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BlogIntent::StartEditing { .. } => "blog/startEditingPost",
            BlogIntent::CancelEditing => "blog/cancelEditingPost",
            BlogIntent::GetPostList(_) => "blog/getPostList",
            BlogIntent::AddPost(_) => "blog/addPost",
            BlogIntent::UpdatePost(_) => "blog/updatePost",
            BlogIntent::DeletePost(_) => "blog/deletePost",
        }
    }

    /// Phase of an asynchronous intent, `None` for synchronous ones.
    pub fn phase(&self) -> Option<PhaseKind> {
        match self {
            BlogIntent::StartEditing { .. } | BlogIntent::CancelEditing => None,
            BlogIntent::GetPostList(phase) => Some(phase.kind()),
            BlogIntent::AddPost(phase) => Some(phase.kind()),
            BlogIntent::UpdatePost(phase) => Some(phase.kind()),
            BlogIntent::DeletePost(phase) => Some(phase.kind()),
        }
    }

    /// Request id of an asynchronous intent.
    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            BlogIntent::StartEditing { .. } | BlogIntent::CancelEditing => None,
            BlogIntent::GetPostList(phase) => Some(phase.meta().request_id),
            BlogIntent::AddPost(phase) => Some(phase.meta().request_id),
            BlogIntent::UpdatePost(phase) => Some(phase.meta().request_id),
            BlogIntent::DeletePost(phase) => Some(phase.meta().request_id),
        }
    }
}
