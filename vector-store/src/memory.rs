//! In-process vector backend.
//!
//! Holds points in a map and searches them with exact cosine similarity.
//! Used by tests and as a dependency-free fallback when no external store is
//! configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use casegen_embeddings::{Embedding, find_top_k};

use crate::backend::{SearchHit, StoredPoint, VectorBackend};
use crate::error::Result;

#[derive(Default)]
struct Collection {
    points: HashMap<u64, (Embedding, serde_json::Value)>,
}

/// In-memory vector backend.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, |c| c.points.len())
    }

    /// Check whether a collection holds no points.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

#[async_trait]
impl VectorBackend for MemoryBackend {
    async fn ensure_collection(&self, collection: &str, _dimension: usize) -> Result<()> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn upsert(&self, collection: &str, point: StoredPoint) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .points
            .insert(point.id, (point.vector, point.payload));
        debug!("Upserted point {} into {collection}", point.id);
        Ok(())
    }

    async fn retrieve(&self, collection: &str, id: u64) -> Result<Option<serde_json::Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.points.get(&id))
            .map(|(_, payload)| payload.clone()))
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let collections = self.collections.read().await;
        let Some(stored) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let candidates: Vec<(u64, Embedding)> = stored
            .points
            .iter()
            .map(|(id, (vector, _))| (*id, vector.clone()))
            .collect();

        let query = vector.to_vec();
        let top = find_top_k(&query, &candidates, limit)?;

        let hits = top
            .into_iter()
            .filter_map(|r| {
                stored.points.get(&r.id).map(|(_, payload)| SearchHit {
                    id: r.id,
                    score: r.score,
                    payload: payload.clone(),
                })
            })
            .collect();
        Ok(hits)
    }
}
