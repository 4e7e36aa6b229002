//! Shared test utilities and service doubles.

#![allow(dead_code)]

pub mod mock_backend;

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use blog_store::api::{ApiError, PostService};
use blog_store::post::{Post, PostBody};
use blog_store::store::PostStore;
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// In-memory post backend with per-call gates and scripted failures.
///
/// Calls are keyed as `list`, `add`, `update:<id>` and `delete:<id>`.
pub struct FakePostService {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicU64,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failures: Mutex<HashMap<String, u16>>,
    latency: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl FakePostService {
    pub fn new() -> Arc<Self> {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(posts.len() as u64 + 1),
            posts: Mutex::new(posts),
            gates: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            latency: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    /// The next call with `key` blocks until the returned sender fires or
    /// is dropped.
    pub fn hold(&self, key: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.lock().insert(key.to_string(), gate);
        release
    }

    /// The next call with `key` fails with `status`.
    pub fn fail(&self, key: &str, status: u16) {
        self.failures.lock().insert(key.to_string(), status);
    }

    /// Every call sleeps for `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn server_posts(&self) -> Vec<Post> {
        self.posts.lock().clone()
    }

    async fn enter(&self, key: &str) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let gate = self.gates.lock().remove(key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let failure = self.failures.lock().remove(key);
        match failure {
            Some(status) => Err(ApiError::Status {
                status,
                message: format!("scripted failure for {}", key),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostService for FakePostService {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.enter("list").await?;
        Ok(self.posts.lock().clone())
    }

    async fn add_post(&self, body: &PostBody) -> Result<Post, ApiError> {
        self.enter("add").await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let post = body.clone().with_id(id);
        self.posts.lock().push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, post_id: &str, body: &Post) -> Result<Post, ApiError> {
        self.enter(&format!("update:{}", post_id)).await?;
        let mut posts = self.posts.lock();
        match posts.iter_mut().find(|p| p.id == post_id) {
            Some(slot) => {
                *slot = body.clone();
                Ok(body.clone())
            }
            None => Err(ApiError::Status {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }

    async fn delete_post(&self, post_id: &str) -> Result<serde_json::Value, ApiError> {
        self.enter(&format!("delete:{}", post_id)).await?;
        self.posts.lock().retain(|p| p.id != post_id);
        Ok(serde_json::json!({}))
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post::new("1", "First"),
        Post::new("2", "Second"),
        Post::new("3", "Third"),
    ]
}

/// Store over a fake service, already loaded with `posts`.
pub async fn loaded_store(posts: Vec<Post>) -> (PostStore, Arc<FakePostService>) {
    let service = FakePostService::with_posts(posts);
    let store = PostStore::new(service.clone());
    store
        .get_post_list()
        .wait()
        .await
        .expect("initial list should succeed");
    (store, service)
}
