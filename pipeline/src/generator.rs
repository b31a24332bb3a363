//! The generation pipeline driver.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use casegen_protocol::TestCase;

use crate::error::{GenerationError, Result};
use crate::model::ModelClient;
use crate::parse::extract_test_cases;
use crate::prompt::build_prompt;

/// Bounded retry with exponential backoff for model calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,

    /// Base delay; the sleep after the n-th failure is `base_delay * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

/// Produces validated test cases from a raw ticket description.
///
/// Transport failures are retried per the policy; parse failures are
/// terminal. Nothing is persisted here. Persistence is the orchestrator's
/// concern, so a failed generation never leaves a partial record behind.
pub struct TestCaseGenerator {
    client: Arc<dyn ModelClient>,
    retry: RetryPolicy,
}

impl TestCaseGenerator {
    /// Create a generator over the given model client.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate test cases for a description.
    ///
    /// An empty or whitespace-only description is passed through unchanged;
    /// this layer does not reject it.
    pub async fn generate(&self, description: &str) -> Result<Vec<TestCase>> {
        let prompt = build_prompt(description);
        let max = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max {
            info!(
                "Calling model {} (attempt {attempt}/{max})",
                self.client.model_name()
            );

            match self.client.generate(&prompt).await {
                Ok(raw) => {
                    let cases = extract_test_cases(&raw)?;
                    info!("Generated {} test cases", cases.len());
                    return Ok(cases);
                }
                Err(GenerationError::Transport { message }) => {
                    warn!("Model call failed (attempt {attempt}/{max}): {message}");
                    last_error = message;
                }
                // Parse and response-shape failures are terminal: retrying
                // the same prompt would burn the budget without new
                // information.
                Err(other) => return Err(other),
            }

            if attempt < max {
                let delay = self.retry.base_delay * 2u32.pow(attempt);
                info!("Retrying model call in {delay:?}");
                tokio::time::sleep(delay).await;
            }
        }

        Err(GenerationError::Exhausted {
            attempts: max,
            last_error,
        })
    }
}
