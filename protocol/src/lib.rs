//! # Protocol
//!
//! Shared data model for the casegen service: the test cases produced by the
//! generation pipeline, the per-ticket records held in the vector store, and
//! the request/response bodies exchanged with the HTTP boundary.

pub mod types;

pub use types::{SearchRequest, SearchResponse, TestCase, TicketRecord, TicketRequest};
