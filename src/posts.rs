use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A post as returned by the posts API. Fields the API may add beyond
/// these are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Confirmation payload returned by the bulk delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Errors from posts API operations.
#[derive(Debug, Error)]
pub enum PostsError {
    #[error("request to posts API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("posts API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
}

/// The three operations the bot performs against the posts API.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn create_post(&self, content: &str) -> Result<Post, PostsError>;
    async fn list_posts(&self) -> Result<Vec<Post>, PostsError>;
    async fn delete_all_posts(&self) -> Result<DeleteConfirmation, PostsError>;
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    content: &'a str,
}

/// HTTP client for the external posts API. One call per operation, no retry.
pub struct PostsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PostsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PostsError::Api { status, body });
        }
        Ok(response)
    }
}

#[async_trait]
impl PostsApi for PostsClient {
    async fn create_post(&self, content: &str) -> Result<Post, PostsError> {
        debug!("Creating post at {}", self.base_url);

        let response = self
            .client
            .post(&self.base_url)
            .json(&CreatePostRequest { content })
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostsError> {
        debug!("Fetching posts from {}", self.base_url);

        let response = self.client.get(&self.base_url).send().await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn delete_all_posts(&self) -> Result<DeleteConfirmation, PostsError> {
        debug!("Deleting all posts at {}", self.base_url);

        let response = self.client.delete(&self.base_url).send().await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}
