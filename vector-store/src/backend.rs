//! Backing-store abstraction.
//!
//! The store's persistence and nearest-neighbor search are behind a trait so
//! the production Qdrant backend and the in-process fallback are
//! interchangeable, and so tests run without a live store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use casegen_embeddings::Embedding;

use crate::error::Result;

/// A point as written to the backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPoint {
    /// Stable numeric key derived from the ticket id.
    pub id: u64,

    /// Embedding over the record's text.
    pub vector: Embedding,

    /// The record itself, as JSON.
    pub payload: serde_json::Value,
}

/// A search match returned by the backing store.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Key of the matched point.
    pub id: u64,

    /// Similarity score, higher is closer.
    pub score: f32,

    /// The matched point's payload.
    pub payload: serde_json::Value,
}

/// Trait for vector backing stores.
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Create the collection if it does not exist. Safe to call on every
    /// startup.
    async fn ensure_collection(&self, collection: &str, dimension: usize) -> Result<()>;

    /// Write a point, overwriting any existing point with the same id.
    async fn upsert(&self, collection: &str, point: StoredPoint) -> Result<()>;

    /// Exact lookup by point id. Absence is `Ok(None)`, never an error.
    async fn retrieve(&self, collection: &str, id: u64) -> Result<Option<serde_json::Value>>;

    /// Nearest-neighbor search, returning up to `limit` hits ordered by
    /// decreasing similarity.
    async fn search(&self, collection: &str, vector: &[f32], limit: usize)
    -> Result<Vec<SearchHit>>;
}
