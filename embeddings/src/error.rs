//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Model failed to load within the retry budget. Fatal at process start.
    #[error("embedding model failed to load after {attempts} attempts: {message}")]
    InitializationFailed { attempts: u32, message: String },

    /// `embed` was called before the model finished loading.
    #[error("embedding provider not initialized")]
    NotInitialized,

    /// Model inference failed.
    #[error("embedding model error: {0}")]
    Model(String),

    /// Model returned no vector for the input.
    #[error("embedding model returned no output")]
    EmptyOutput,

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
