use thiserror::Error;

use crate::blog::RejectReason;

/// Outcome of waiting on an [`AsyncRequest`](super::AsyncRequest) that did
/// not fulfil.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request settled in the rejected phase.
    #[error(transparent)]
    Rejected(#[from] RejectReason),

    /// The task driving the request stopped before reporting back.
    #[error("Request task failed: {0}")]
    TaskFailed(String),
}

impl StoreError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StoreError::Rejected(reason) if reason.is_cancelled())
    }
}
