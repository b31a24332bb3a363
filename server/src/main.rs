//! Composition root for the casegen service.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use casegen_core::{Config, JiraTracker, Orchestrator};
use casegen_embeddings::{EmbeddingProvider, LocalModelProvider};
use casegen_pipeline::{OllamaClient, TestCaseGenerator};
use casegen_server::{AppState, router};
use casegen_vector_store::{QdrantBackend, VectorStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("Starting casegen server on {}", config.bind_addr);

    // The whole process is unusable without an embedding capability, so a
    // failed load after the retry budget aborts startup.
    let provider = Arc::new(LocalModelProvider::new());
    provider
        .initialize()
        .await
        .context("embedding model initialization failed")?;

    let backend = Arc::new(QdrantBackend::new(&config.vector_store_url));
    let store = Arc::new(VectorStore::new(backend, provider));
    store
        .ensure_collection()
        .await
        .context("vector store collection setup failed")?;

    let model = Arc::new(
        OllamaClient::new(&config.model_base_url, &config.model_name)
            .with_timeout(config.generation_timeout),
    );
    let generator = Arc::new(TestCaseGenerator::new(model));
    let tracker = Arc::new(JiraTracker::new());

    let orchestrator = Orchestrator::new(store, generator, tracker);
    let state = Arc::new(AppState {
        orchestrator,
        config: config.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, router(state))
        .await
        .context("server error")?;
    Ok(())
}
