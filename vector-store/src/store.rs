//! The vector store over ticket records.

use std::sync::Arc;

use tracing::{debug, warn};

use casegen_embeddings::EmbeddingProvider;
use casegen_protocol::{TestCase, TicketRecord};

use crate::backend::{StoredPoint, VectorBackend};
use crate::error::{Result, StorageError};
use crate::key::derive_key;

/// Name of the single collection this store owns.
pub const DEFAULT_COLLECTION: &str = "test_cases";

/// Durable key-value and similarity index over [`TicketRecord`]s.
///
/// Writes are keyed by [`derive_key`], so storing the same ticket twice
/// overwrites instead of duplicating. Reads by ticket id are exact; reads by
/// query text are nearest-neighbor over the embedded record text.
pub struct VectorStore {
    backend: Arc<dyn VectorBackend>,
    embeddings: Arc<dyn EmbeddingProvider>,
    collection: String,
}

impl VectorStore {
    /// Create a store over the given backend and embedding provider.
    pub fn new(backend: Arc<dyn VectorBackend>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            backend,
            embeddings,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Use a different collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Check whether the embedding provider is ready to serve.
    pub fn is_ready(&self) -> bool {
        self.embeddings.is_ready()
    }

    /// Create the backing collection if absent. Called on every startup.
    pub async fn ensure_collection(&self) -> Result<()> {
        self.backend
            .ensure_collection(&self.collection, self.embeddings.dimension())
            .await
    }

    /// Store a ticket's description and generated test cases.
    ///
    /// The embedding covers both the description and the serialized cases so
    /// a search can match on either. Returns the ticket id on success.
    pub async fn upsert(
        &self,
        ticket_id: &str,
        description: &str,
        test_cases: &[TestCase],
    ) -> Result<String> {
        let cases_json = serde_json::to_string(test_cases)
            .map_err(|e| StorageError::Schema(e.to_string()))?;
        let embedding_text = format!("{description} {cases_json}");
        let vector = self.embeddings.embed(&embedding_text).await?;

        let record = TicketRecord::new(ticket_id, description, test_cases.to_vec());
        let payload =
            serde_json::to_value(&record).map_err(|e| StorageError::Schema(e.to_string()))?;

        let point = StoredPoint {
            id: derive_key(ticket_id),
            vector,
            payload,
        };
        self.backend.upsert(&self.collection, point).await?;

        debug!("Stored test cases for ticket {ticket_id}");
        Ok(ticket_id.to_string())
    }

    /// Exact lookup by ticket id.
    ///
    /// Absence is a normal outcome and returns `Ok(None)`. Because point
    /// keys are hashes, a key collision could surface another ticket's
    /// record; the payload's own ticket id is checked and a mismatch is
    /// treated as absent.
    pub async fn get(&self, ticket_id: &str) -> Result<Option<TicketRecord>> {
        let key = derive_key(ticket_id);
        let Some(payload) = self.backend.retrieve(&self.collection, key).await? else {
            return Ok(None);
        };

        let record: TicketRecord =
            serde_json::from_value(payload).map_err(|e| StorageError::Schema(e.to_string()))?;

        if record.ticket_id != ticket_id {
            warn!(
                "Point key collision: key {key} holds ticket {} but {ticket_id} was requested",
                record.ticket_id
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Semantic search over stored records.
    ///
    /// Returns up to `limit` records ordered by decreasing similarity to the
    /// query text; an empty result is not an error.
    pub async fn search(&self, query_text: &str, limit: usize) -> Result<Vec<TicketRecord>> {
        let vector = self.embeddings.embed(query_text).await?;
        let hits = self.backend.search(&self.collection, &vector, limit).await?;

        hits.into_iter()
            .map(|hit| {
                serde_json::from_value(hit.payload)
                    .map_err(|e| StorageError::Schema(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use casegen_embeddings::{Embedding, EmbeddingError};
    use pretty_assertions::assert_eq;

    use crate::memory::MemoryBackend;

    /// Deterministic provider: the vector is a pure function of the text's
    /// bytes, so identical text always embeds identically.
    struct StubProvider;

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn dimension(&self) -> usize {
            4
        }

        fn is_ready(&self) -> bool {
            true
        }

        async fn initialize(&self) -> std::result::Result<(), EmbeddingError> {
            Ok(())
        }

        async fn embed(&self, text: &str) -> std::result::Result<Embedding, EmbeddingError> {
            let seed: u64 = text.bytes().map(u64::from).sum();
            Ok((1..=4)
                .map(|i| ((seed.wrapping_mul(i) % 97) as f32) / 97.0)
                .collect())
        }
    }

    fn store() -> VectorStore {
        VectorStore::new(Arc::new(MemoryBackend::new()), Arc::new(StubProvider))
    }

    fn sample_cases() -> Vec<TestCase> {
        vec![
            TestCase::new(
                "TC-001",
                "Verify login with valid credentials",
                vec!["Open login page".to_string(), "Enter credentials".to_string()],
                "User is logged in",
            ),
            TestCase::new(
                "TC-002",
                "Verify login with invalid credentials",
                vec!["Open login page".to_string(), "Enter garbage".to_string()],
                "Error message is shown",
            ),
        ]
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let store = store();
        let cases = sample_cases();

        let returned = store.upsert("PROJ-1", "login flow", &cases).await.unwrap();
        assert_eq!(returned, "PROJ-1");

        let record = store.get("PROJ-1").await.unwrap().expect("record stored");
        assert_eq!(record.ticket_id, "PROJ-1");
        assert_eq!(record.description, "login flow");
        assert_eq!(record.test_cases, cases);
    }

    #[tokio::test]
    async fn get_absent_is_none_not_error() {
        let store = store();
        assert!(store.get("nonexistent-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_same_ticket_overwrites() {
        let store = store();
        store.upsert("PROJ-1", "first", &[]).await.unwrap();
        store.upsert("PROJ-1", "second", &sample_cases()).await.unwrap();

        let record = store.get("PROJ-1").await.unwrap().expect("record stored");
        assert_eq!(record.description, "second");
        assert_eq!(record.test_cases.len(), 2);
    }

    #[tokio::test]
    async fn search_finds_stored_records() {
        let store = store();
        store.upsert("PROJ-1", "login flow", &sample_cases()).await.unwrap();
        store.upsert("PROJ-2", "checkout flow", &[]).await.unwrap();

        let results = store.search("anything", 5).await.unwrap();
        assert_eq!(results.len(), 2);

        let results = store.search("anything", 1).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn search_empty_store_is_empty() {
        let store = store();
        assert!(store.search("anything", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn colliding_key_with_foreign_payload_reads_as_absent() {
        let backend = Arc::new(MemoryBackend::new());
        let store = VectorStore::new(backend.clone(), Arc::new(StubProvider));

        // Plant a point at PROJ-1's key whose payload belongs to a different
        // ticket, simulating a hash collision.
        let foreign = TicketRecord::new("OTHER-9", "other", Vec::new());
        let point = StoredPoint {
            id: derive_key("PROJ-1"),
            vector: vec![0.0; 4],
            payload: serde_json::to_value(&foreign).unwrap(),
        };
        backend.upsert(DEFAULT_COLLECTION, point).await.unwrap();

        assert!(store.get("PROJ-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_payload_is_schema_error() {
        let backend = Arc::new(MemoryBackend::new());
        let store = VectorStore::new(backend.clone(), Arc::new(StubProvider));

        let point = StoredPoint {
            id: derive_key("PROJ-1"),
            vector: vec![0.0; 4],
            payload: serde_json::json!({"not": "a record"}),
        };
        backend.upsert(DEFAULT_COLLECTION, point).await.unwrap();

        let err = store.get("PROJ-1").await.unwrap_err();
        assert!(matches!(err, StorageError::Schema(_)));
    }
}
