//! Error types for the vector store.

use thiserror::Error;

use casegen_embeddings::EmbeddingError;

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur talking to the backing store.
///
/// Absence of a point is not an error; lookups return `Option` instead.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not reach the backing store.
    #[error("vector store connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The backing store rejected the request.
    #[error("vector store request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Stored payload did not match the expected record shape.
    #[error("stored payload schema mismatch: {0}")]
    Schema(String),

    /// Embedding the text to store or search for failed.
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}
