//! # Vector Store
//!
//! This crate owns the single collection holding generated test cases and
//! provides deterministic upsert-by-key, exact-key retrieval, and
//! nearest-neighbor search over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Vector Store                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  VectorStore ──► EmbeddingProvider (text → vector)              │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  VectorBackend (trait) ──► QdrantBackend │ MemoryBackend        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Point keys are a pure function of the ticket id (see [`key::derive_key`]),
//! so re-storing a ticket overwrites its point rather than duplicating it.

pub mod backend;
pub mod error;
pub mod key;
pub mod memory;
pub mod qdrant;
pub mod store;

pub use backend::{SearchHit, StoredPoint, VectorBackend};
pub use error::{Result, StorageError};
pub use key::derive_key;
pub use memory::MemoryBackend;
pub use qdrant::QdrantBackend;
pub use store::{DEFAULT_COLLECTION, VectorStore};
