//! Error types for the generation pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while generating test cases.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A single model call failed at the transport level (non-2xx status,
    /// connection failure, or timeout). Retryable.
    #[error("model endpoint transport error: {message}")]
    Transport { message: String },

    /// Every attempt failed at the transport level. Carries the last error
    /// body for diagnostics.
    #[error("model endpoint failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The model replied but its body was not the expected response shape.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    /// No JSON array could be extracted from the model output. Terminal,
    /// never retried. `snippet` is the raw output truncated for diagnostics.
    #[error("could not parse test cases from model output: {reason}; output was: {snippet}")]
    Parse { reason: String, snippet: String },
}
