//! Embedding providers.
//!
//! The provider is an explicitly constructed instance with a lifecycle:
//! `initialize()` loads the model with bounded retries, `is_ready()` reports
//! health, and `embed()` is a pure function of its input once loading has
//! succeeded.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info, warn};

use crate::EMBEDDING_DIMENSION;
use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the embedding dimension. Never varies across calls.
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    /// Check whether the underlying model has been loaded.
    fn is_ready(&self) -> bool;

    /// Load the underlying model. Must be called before `embed`.
    async fn initialize(&self) -> Result<()>;

    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Local embedding provider running all-MiniLM-L6-v2 via ONNX.
///
/// The model download can be slow or flaky on first run, so `initialize`
/// retries with a linearly increasing delay before giving up. A process
/// without a working embedding capability is unusable, so exhausting the
/// retry budget is a fatal `InitializationFailed`.
pub struct LocalModelProvider {
    /// Loaded model. `None` until `initialize` succeeds. Inference requires
    /// `&mut`, hence the mutex.
    model: Arc<Mutex<Option<TextEmbedding>>>,

    /// Load attempts before giving up.
    max_attempts: u32,

    /// Unit delay for the linear backoff between load attempts.
    retry_unit: Duration,
}

impl LocalModelProvider {
    /// Create a new provider. The model is not loaded until `initialize`.
    pub fn new() -> Self {
        Self {
            model: Arc::new(Mutex::new(None)),
            max_attempts: 3,
            retry_unit: Duration::from_secs(5),
        }
    }

    /// Set the number of load attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the unit delay for the backoff between load attempts.
    pub fn with_retry_unit(mut self, unit: Duration) -> Self {
        self.retry_unit = unit;
        self
    }

    async fn try_load(&self) -> Result<()> {
        let loaded = tokio::task::spawn_blocking(|| {
            let options =
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::Model(e.to_string()))
        })
        .await
        .map_err(|e| EmbeddingError::Model(e.to_string()))??;

        let mut guard = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(loaded);
        Ok(())
    }
}

impl Default for LocalModelProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for LocalModelProvider {
    fn name(&self) -> &str {
        "all-MiniLM-L6-v2"
    }

    fn is_ready(&self) -> bool {
        self.model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    async fn initialize(&self) -> Result<()> {
        if self.is_ready() {
            return Ok(());
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_attempts {
            info!(
                "Loading embedding model (attempt {attempt}/{})",
                self.max_attempts
            );
            match self.try_load().await {
                Ok(()) => {
                    info!("Embedding model loaded");
                    return Ok(());
                }
                Err(e) => {
                    warn!("Failed to load embedding model: {e}");
                    last_error = e.to_string();
                }
            }

            if attempt < self.max_attempts {
                let wait = self.retry_unit * attempt;
                info!("Retrying model load in {wait:?}");
                tokio::time::sleep(wait).await;
            }
        }

        Err(EmbeddingError::InitializationFailed {
            attempts: self.max_attempts,
            message: last_error,
        })
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        if !self.is_ready() {
            return Err(EmbeddingError::NotInitialized);
        }

        let model = Arc::clone(&self.model);
        let input = text.to_owned();

        let embedding = tokio::task::spawn_blocking(move || {
            let mut guard = model.lock().unwrap_or_else(PoisonError::into_inner);
            let loaded = guard.as_mut().ok_or(EmbeddingError::NotInitialized)?;
            let mut vectors = loaded
                .embed(vec![input], None)
                .map_err(|e| EmbeddingError::Model(e.to_string()))?;
            if vectors.is_empty() {
                return Err(EmbeddingError::EmptyOutput);
            }
            Ok(vectors.remove(0))
        })
        .await
        .map_err(|e| EmbeddingError::Model(e.to_string()))??;

        if embedding.len() != EMBEDDING_DIMENSION {
            return Err(EmbeddingError::DimensionMismatch {
                expected: EMBEDDING_DIMENSION,
                actual: embedding.len(),
            });
        }

        debug!("Generated embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }
}
