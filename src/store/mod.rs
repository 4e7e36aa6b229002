//! Observable post store.
//!
//! [`PostStore`] is the single writer of [`BlogState`]. Every change goes
//! through [`PostStore::dispatch`], which runs the pure [`BlogReducer`] under
//! a lock, publishes the new snapshot and notifies subscribers. Subscribers
//! see snapshots in the order the transitions were applied, across threads.
//!
//! Asynchronous actions apply their pending phase before returning and then
//! settle from a spawned tokio task, so they must be called inside a runtime.

mod cancel;
mod error;
mod request;

pub use cancel::CancelToken;
pub use error::StoreError;
pub use request::AsyncRequest;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::watch;

use crate::api::{ApiError, PostService};
use crate::blog::{
    AsyncPhase, BlogIntent, BlogReducer, BlogState, RejectReason, RequestMeta, UpdatePostArg,
};
use crate::mvi::Reducer;
use crate::post::{Post, PostBody};

/// Callback invoked with the new snapshot after every applied intent.
pub type Listener = Arc<dyn Fn(&BlogState) + Send + Sync>;

/// Token returned by [`PostStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StoreInner {
    state: BlogState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Snapshots waiting to be delivered to listeners.
#[derive(Default)]
struct Outbox {
    queue: VecDeque<BlogState>,
    delivering: bool,
}

/// Resets the outbox if a listener panics mid-delivery.
struct DeliveryGuard<'a>(&'a RefCell<Outbox>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        let mut outbox = self.0.borrow_mut();
        outbox.delivering = false;
        outbox.queue.clear();
    }
}

/// Cheaply cloneable handle to one store. Clones share state.
#[derive(Clone)]
pub struct PostStore {
    inner: Arc<Mutex<StoreInner>>,
    /// Taken before `inner` and held until listeners have run. Reentrant so
    /// listeners can dispatch.
    outbox: Arc<ReentrantMutex<RefCell<Outbox>>>,
    service: Arc<dyn PostService>,
    snapshots: Arc<watch::Sender<BlogState>>,
}

impl PostStore {
    /// Create a store with empty posts, no selection and `loading = false`.
    pub fn new(service: Arc<dyn PostService>) -> Self {
        let (snapshots, _) = watch::channel(BlogState::default());
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state: BlogState::default(),
                listeners: Vec::new(),
                next_subscription: 0,
            })),
            outbox: Arc::new(ReentrantMutex::new(RefCell::new(Outbox::default()))),
            service,
            snapshots: Arc::new(snapshots),
        }
    }

    // -- Read side ------------------------------------------------------------

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> BlogState {
        self.inner.lock().state.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.inner.lock().state.posts.clone()
    }

    pub fn editing_post(&self) -> Option<Post> {
        self.inner.lock().state.editing_post.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().state.loading
    }

    pub fn find_post(&self, post_id: &str) -> Option<Post> {
        self.inner.lock().state.find_post(post_id).cloned()
    }

    /// Register a callback run after every applied intent.
    ///
    /// Callbacks run on the dispatching task, outside the state lock, so
    /// they may read from or dispatch to the store. A dispatch made from a
    /// callback is delivered once the current snapshot has reached every
    /// listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&BlogState) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    /// Latest-value channel of snapshots. Intermediate states may be skipped.
    pub fn watch(&self) -> watch::Receiver<BlogState> {
        self.snapshots.subscribe()
    }

    // -- Write side -----------------------------------------------------------

    /// Apply one intent and return the resulting snapshot.
    pub fn dispatch(&self, intent: BlogIntent) -> BlogState {
        let action = intent.name();
        tracing::trace!(action, intent = ?intent, "dispatch");

        let outbox = self.outbox.lock();
        let snapshot = {
            let mut inner = self.inner.lock();
            let previous = std::mem::take(&mut inner.state);
            inner.state = BlogReducer::reduce(previous, intent);
            let snapshot = inner.state.clone();
            self.snapshots.send_replace(snapshot.clone());
            snapshot
        };

        tracing::trace!(action, state = ?snapshot, "applied");

        let nested = {
            let mut queued = outbox.borrow_mut();
            queued.queue.push_back(snapshot.clone());
            queued.delivering
        };
        if !nested {
            self.deliver(&outbox);
        }
        snapshot
    }

    /// Drain the outbox in order. Called with the outbox lock held.
    fn deliver(&self, outbox: &RefCell<Outbox>) {
        outbox.borrow_mut().delivering = true;
        let _guard = DeliveryGuard(outbox);

        loop {
            let next = outbox.borrow_mut().queue.pop_front();
            let Some(state) = next else {
                break;
            };
            let listeners: Vec<Listener> = self
                .inner
                .lock()
                .listeners
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect();
            for listener in listeners {
                listener(&state);
            }
        }
    }

    /// Open the post with `post_id` in the editor; clears the selection if
    /// no such post is loaded.
    pub fn start_editing(&self, post_id: impl Into<String>) {
        self.dispatch(BlogIntent::StartEditing {
            post_id: post_id.into(),
        });
    }

    pub fn cancel_editing(&self) {
        self.dispatch(BlogIntent::CancelEditing);
    }

    /// Fetch all posts and replace the collection.
    pub fn get_post_list(&self) -> AsyncRequest<Vec<Post>> {
        self.get_post_list_with_cancel(CancelToken::new())
    }

    pub fn get_post_list_with_cancel(&self, cancel: CancelToken) -> AsyncRequest<Vec<Post>> {
        self.spawn_request((), cancel, BlogIntent::GetPostList, |service, ()| async move {
            service.list_posts().await
        })
    }

    /// Create a post and append the server's copy.
    pub fn add_post(&self, body: PostBody) -> AsyncRequest<Post> {
        self.add_post_with_cancel(body, CancelToken::new())
    }

    pub fn add_post_with_cancel(&self, body: PostBody, cancel: CancelToken) -> AsyncRequest<Post> {
        self.spawn_request(body, cancel, BlogIntent::AddPost, |service, body| async move {
            service.add_post(&body).await
        })
    }

    /// Replace post `post_id` with `body`, then close the editor.
    pub fn update_post(&self, post_id: impl Into<String>, body: Post) -> AsyncRequest<Post> {
        self.update_post_with_cancel(post_id, body, CancelToken::new())
    }

    pub fn update_post_with_cancel(
        &self,
        post_id: impl Into<String>,
        body: Post,
        cancel: CancelToken,
    ) -> AsyncRequest<Post> {
        let arg = UpdatePostArg {
            post_id: post_id.into(),
            body,
        };
        self.spawn_request(
            arg,
            cancel,
            BlogIntent::UpdatePost,
            |service, arg| async move { service.update_post(&arg.post_id, &arg.body).await },
        )
    }

    /// Delete post `post_id` remotely and drop it from the collection.
    pub fn delete_post(&self, post_id: impl Into<String>) -> AsyncRequest<serde_json::Value> {
        self.delete_post_with_cancel(post_id, CancelToken::new())
    }

    pub fn delete_post_with_cancel(
        &self,
        post_id: impl Into<String>,
        cancel: CancelToken,
    ) -> AsyncRequest<serde_json::Value> {
        self.spawn_request(
            post_id.into(),
            cancel,
            BlogIntent::DeletePost,
            |service, post_id| async move { service.delete_post(&post_id).await },
        )
    }

    /// Dispatch `Pending`, then run `call` on a task and dispatch exactly one
    /// of `Fulfilled` or `Rejected` with the same request metadata.
    fn spawn_request<A, T, F, Fut>(
        &self,
        arg: A,
        cancel: CancelToken,
        wrap: fn(AsyncPhase<A, T>) -> BlogIntent,
        call: F,
    ) -> AsyncRequest<T>
    where
        A: Clone + Send + 'static,
        T: Clone + Send + 'static,
        F: FnOnce(Arc<dyn PostService>, A) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let meta = RequestMeta::new(arg);
        let request_id = meta.request_id;
        self.dispatch(wrap(AsyncPhase::Pending { meta: meta.clone() }));

        let store = self.clone();
        let token = cancel.clone();
        let remote = call(Arc::clone(&self.service), meta.arg.clone());

        let handle = tokio::spawn(async move {
            match run_cancellable(remote, &token).await {
                Ok(payload) => {
                    store.dispatch(wrap(AsyncPhase::Fulfilled {
                        meta,
                        payload: payload.clone(),
                    }));
                    Ok(payload)
                }
                Err(reason) => {
                    tracing::warn!(request_id = %meta.request_id, reason = %reason, "Request rejected");
                    store.dispatch(wrap(AsyncPhase::Rejected {
                        meta,
                        reason: reason.clone(),
                    }));
                    Err(reason)
                }
            }
        });

        AsyncRequest::new(request_id, cancel, handle)
    }
}

/// Run a remote call on its own task so cancelling can drop it mid-flight.
async fn run_cancellable<T, Fut>(remote: Fut, cancel: &CancelToken) -> Result<T, RejectReason>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    if cancel.is_cancelled() {
        return Err(RejectReason::Cancelled);
    }

    let mut task = tokio::spawn(remote);
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            task.abort();
            Err(RejectReason::Cancelled)
        }
        joined = &mut task => match joined {
            Ok(result) => result.map_err(RejectReason::from),
            Err(e) => Err(RejectReason::Remote {
                status: None,
                message: format!("Remote call task failed: {}", e),
            }),
        },
    }
}
