//! Qdrant REST backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::backend::{SearchHit, StoredPoint, VectorBackend};
use crate::error::{Result, StorageError};

/// Default timeout for backing-store requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vector backend talking to a Qdrant-compatible store over REST.
pub struct QdrantBackend {
    /// Store base URL, e.g. `http://localhost:6333`.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Per-request timeout.
    timeout: Duration,
}

impl QdrantBackend {
    /// Create a new backend for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn api_error(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StorageError::Api { status, message }
    }
}

#[async_trait]
impl VectorBackend for QdrantBackend {
    async fn ensure_collection(&self, collection: &str, dimension: usize) -> Result<()> {
        let url = format!("{}/collections/{collection}", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status().is_success() {
            debug!("Collection {collection} already exists");
            return Ok(());
        }
        if response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(Self::api_error(response).await);
        }

        info!("Creating collection {collection} with dimension {dimension}");
        let body = serde_json::json!({
            "vectors": { "size": dimension, "distance": "Cosine" }
        });
        let response = self
            .client
            .put(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, point: StoredPoint) -> Result<()> {
        let url = format!("{}/collections/{collection}/points?wait=true", self.base_url);
        let body = serde_json::json!({
            "points": [{
                "id": point.id,
                "vector": point.vector,
                "payload": point.payload,
            }]
        });

        let response = self
            .client
            .put(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        debug!("Upserted point {} into {collection}", point.id);
        Ok(())
    }

    async fn retrieve(&self, collection: &str, id: u64) -> Result<Option<serde_json::Value>> {
        let url = format!("{}/collections/{collection}/points", self.base_url);
        let body = serde_json::json!({
            "ids": [id],
            "with_payload": true,
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let result: RetrieveResponse = response.json().await?;
        Ok(result.result.into_iter().next().and_then(|p| p.payload))
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let url = format!("{}/collections/{collection}/points/search", self.base_url);
        let body = serde_json::json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let result: SearchResponse = response.json().await?;
        let hits = result
            .result
            .into_iter()
            .map(|p| SearchHit {
                id: p.id,
                score: p.score,
                payload: p.payload.unwrap_or(serde_json::Value::Null),
            })
            .collect();
        Ok(hits)
    }
}

/// Qdrant point-retrieve response format.
#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    result: Vec<RetrievedPoint>,
}

#[derive(Debug, Deserialize)]
struct RetrievedPoint {
    #[allow(dead_code)]
    id: u64,
    payload: Option<serde_json::Value>,
}

/// Qdrant search response format.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: u64,
    score: f32,
    payload: Option<serde_json::Value>,
}
