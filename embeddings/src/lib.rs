//! # Embeddings
//!
//! This crate converts free text into dense vectors for the casegen
//! semantic store.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to fixed-dimension vectors with a
//!   local sentence-embedding model
//! - **Lifecycle**: Explicit `initialize()`/`is_ready()` with bounded retries,
//!   owned by the composition root and injected where needed
//! - **Similarity**: Cosine similarity and top-k helpers for in-process search
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Embeddings System                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► similarity::find_top_k     │
//! │        │                                                        │
//! │        ▼                                                        │
//! │  LocalModelProvider (all-MiniLM-L6-v2, 384 dims)                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, LocalModelProvider};
pub use similarity::{SimilarityResult, cosine_similarity, find_top_k};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of every embedding produced by this crate (all-MiniLM-L6-v2).
pub const EMBEDDING_DIMENSION: usize = 384;
