use tokio::task::JoinHandle;
use uuid::Uuid;

use super::cancel::CancelToken;
use super::error::StoreError;
use crate::blog::RejectReason;

/// Handle to an asynchronous store action.
///
/// The pending phase has already been applied when this handle is returned.
/// The request settles on its own; dropping the handle does not cancel it.
pub struct AsyncRequest<T> {
    request_id: Uuid,
    cancel: CancelToken,
    handle: JoinHandle<Result<T, RejectReason>>,
}

impl<T> AsyncRequest<T> {
    pub(crate) fn new(
        request_id: Uuid,
        cancel: CancelToken,
        handle: JoinHandle<Result<T, RejectReason>>,
    ) -> Self {
        Self {
            request_id,
            cancel,
            handle,
        }
    }

    /// Id carried by every phase of this request.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Cancel the remote call. The request settles as rejected unless it
    /// already fulfilled.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this request. Clone it to cancel other requests
    /// together with this one.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Wait for the request to settle and return its payload.
    pub async fn wait(self) -> Result<T, StoreError> {
        match self.handle.await {
            Ok(result) => result.map_err(StoreError::from),
            Err(e) => Err(StoreError::TaskFailed(e.to_string())),
        }
    }
}
