//! # Core
//!
//! The request orchestrator: one fixed pipeline per ticket id
//! (cache-check → fetch → generate → background persist → return), plus the
//! ticket-tracker client it fetches descriptions from and the service
//! configuration.
//!
//! The orchestrator is stateless across requests; re-entry for a cached
//! ticket short-circuits without touching the tracker or the model.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod tracker;

pub use config::Config;
pub use error::{CoreError, Result, TrackerError};
pub use orchestrator::Orchestrator;
pub use tracker::{Credentials, JiraTracker, TicketTracker};
