//! HTTP client for a JSON post backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use super::error::ApiError;
use super::service::PostService;
use crate::config::ApiConfig;
use crate::post::{Post, PostBody};

/// [`PostService`] over HTTP.
///
/// Every call is bounded by the configured total timeout, including reading
/// the response body.
pub struct HttpPostService {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpPostService {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::Client(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ApiError::Client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/posts` or `{base}/posts/{post_id}`, with the id percent-encoded.
    fn posts_url(&self, post_id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::Client(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().push("posts");
            if let Some(post_id) = post_id {
                segments.push(post_id);
            }
        }
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder, url: &Url) -> Result<String, ApiError> {
        match timeout(self.timeout, self.fetch_text(request, url)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                duration: self.timeout.as_secs(),
            }),
        }
    }

    async fn fetch_text(&self, request: RequestBuilder, url: &Url) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Connection {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            tracing::warn!(status = %status, url = %url, error = %message, "Post service error");

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.text().await.map_err(|e| ApiError::Connection {
            url: url.to_string(),
            source: e,
        })
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let text = self.execute(request, url).await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{} from {}: {}", e, url, truncate(&text, 120))))
    }
}

#[async_trait]
impl PostService for HttpPostService {
    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = self.posts_url(None)?;
        tracing::debug!(url = %url, "GET posts");
        self.execute_json(self.client.get(url.clone()), &url).await
    }

    async fn add_post(&self, body: &PostBody) -> Result<Post, ApiError> {
        let url = self.posts_url(None)?;
        tracing::debug!(url = %url, title = %body.title, "POST post");
        self.execute_json(self.client.post(url.clone()).json(body), &url).await
    }

    async fn update_post(&self, post_id: &str, body: &Post) -> Result<Post, ApiError> {
        let url = self.posts_url(Some(post_id))?;
        tracing::debug!(url = %url, "PUT post");
        self.execute_json(self.client.put(url.clone()).json(body), &url).await
    }

    async fn delete_post(&self, post_id: &str) -> Result<serde_json::Value, ApiError> {
        let url = self.posts_url(Some(post_id))?;
        tracing::debug!(url = %url, "DELETE post");
        let text = self.execute(self.client.delete(url.clone()), &url).await?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{} from {}: {}", e, url, truncate(&text, 120))))
    }
}

/// Truncate a body excerpt for error messages.
fn truncate(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
