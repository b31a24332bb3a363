//! The request orchestrator.

use std::sync::Arc;

use tracing::{info, warn};

use casegen_pipeline::TestCaseGenerator;
use casegen_protocol::TicketRecord;
use casegen_vector_store::VectorStore;

use crate::error::Result;
use crate::tracker::{Credentials, TicketTracker, sentinel_description};

/// Coordinates the fixed per-ticket pipeline: cache-check → fetch →
/// generate → background persist → return.
///
/// Stateless across requests. Concurrent requests for the same uncached
/// ticket are not coordinated: both may generate, and the last persist wins.
pub struct Orchestrator {
    store: Arc<VectorStore>,
    generator: Arc<TestCaseGenerator>,
    tracker: Arc<dyn TicketTracker>,
}

impl Orchestrator {
    /// Create an orchestrator over its three collaborators.
    pub fn new(
        store: Arc<VectorStore>,
        generator: Arc<TestCaseGenerator>,
        tracker: Arc<dyn TicketTracker>,
    ) -> Self {
        Self {
            store,
            generator,
            tracker,
        }
    }

    /// Whether the embedding capability behind the store is ready.
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Return the stored record for a ticket, generating it first if absent.
    ///
    /// Once a record exists for a ticket id it is returned unchanged forever;
    /// no regeneration, no merge. Generation failures surface to the caller
    /// and leave nothing persisted. Persistence of a fresh record happens in
    /// the background after the response value is determined; a persist
    /// failure only means the next request regenerates.
    pub async fn generate_or_fetch(
        &self,
        ticket_id: &str,
        credentials: &Credentials,
    ) -> Result<TicketRecord> {
        if let Some(record) = self.store.get(ticket_id).await? {
            info!("Returning cached test cases for ticket {ticket_id}");
            return Ok(record);
        }

        let description = if credentials.is_test_sentinel() {
            info!("Using sentinel description for ticket {ticket_id}");
            sentinel_description()
        } else {
            info!("Fetching description for ticket {ticket_id}");
            self.tracker.fetch(ticket_id, credentials).await?
        };

        let test_cases = self.generator.generate(&description).await?;
        let record = TicketRecord::new(ticket_id, description, test_cases);

        let store = Arc::clone(&self.store);
        let persisted = record.clone();
        tokio::spawn(async move {
            if let Err(e) = store
                .upsert(
                    &persisted.ticket_id,
                    &persisted.description,
                    &persisted.test_cases,
                )
                .await
            {
                warn!(
                    "Background persist failed for ticket {}: {e}",
                    persisted.ticket_id
                );
            }
        });

        Ok(record)
    }

    /// Exact lookup of a stored record. Absence is `Ok(None)`.
    pub async fn get_stored(&self, ticket_id: &str) -> Result<Option<TicketRecord>> {
        Ok(self.store.get(ticket_id).await?)
    }

    /// Semantic search over stored records, closest first.
    pub async fn search_similar(&self, query: &str, limit: usize) -> Result<Vec<TicketRecord>> {
        Ok(self.store.search(query, limit).await?)
    }
}
