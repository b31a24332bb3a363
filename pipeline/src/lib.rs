//! # Generation Pipeline
//!
//! Turns a raw ticket description into a validated sequence of test cases:
//! prompt construction, model invocation with bounded retry, and extraction
//! of the JSON array the model was asked to emit (and frequently wraps in
//! commentary anyway).
//!
//! ```text
//! description ──► prompt ──► ModelClient ──► raw text ──► Vec<TestCase>
//!                               │ retry on transport errors
//!                               ▼
//!                         OllamaClient
//! ```

pub mod error;
pub mod generator;
pub mod model;
pub mod parse;
pub mod prompt;

pub use error::{GenerationError, Result};
pub use generator::{RetryPolicy, TestCaseGenerator};
pub use model::{DEFAULT_GENERATION_TIMEOUT, ModelClient, OllamaClient};
pub use parse::extract_test_cases;
pub use prompt::build_prompt;
