//! Error types for request orchestration.

use thiserror::Error;

use casegen_pipeline::GenerationError;
use casegen_vector_store::StorageError;

/// Result type alias for orchestration operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors from the ticket tracker.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// No usable credentials were supplied or configured.
    #[error("ticket tracker credentials not provided")]
    MissingCredentials,

    /// The tracker rejected the credentials.
    #[error("ticket tracker rejected credentials with status {status}: {message}")]
    Auth { status: u16, message: String },

    /// The ticket does not exist.
    #[error("ticket {ticket_id} not found")]
    NotFound { ticket_id: String },

    /// Network or server failure talking to the tracker. Not retried.
    #[error("ticket tracker transport error: {message}")]
    Transport { message: String },
}

/// Top-level error for the orchestrator's synchronous paths.
///
/// Background persistence failures never appear here; they are logged and
/// dropped after the caller already has its response.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Fetching the ticket description failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// The generation pipeline failed; nothing was persisted.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The vector store failed on a synchronous path.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
