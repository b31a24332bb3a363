//! Core data types.
//!
//! `TestCase` fields all carry `#[serde(default)]`: model output is tolerated
//! at the per-field level, so an entry missing a title still parses instead of
//! failing the whole batch.

use serde::{Deserialize, Serialize};

/// A single manual QA test case.
///
/// Immutable once generated; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier unique within a ticket's set, e.g. `TC-001`.
    #[serde(default)]
    pub test_id: String,

    /// Short human-readable title.
    #[serde(default)]
    pub title: String,

    /// Ordered steps to execute.
    #[serde(default)]
    pub steps: Vec<String>,

    /// Expected outcome after the final step.
    #[serde(default)]
    pub expected_result: String,
}

impl TestCase {
    /// Create a new test case.
    pub fn new(
        test_id: impl Into<String>,
        title: impl Into<String>,
        steps: Vec<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            title: title.into(),
            steps,
            expected_result: expected_result.into(),
        }
    }
}

/// The stored record for one ticket: its description and the test cases
/// generated from it.
///
/// Created on the first successful generation for a ticket id and never
/// mutated afterwards; later requests for the same id return this record
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// External ticket identifier.
    pub ticket_id: String,

    /// Raw ticket description the cases were generated from.
    pub description: String,

    /// Generated test cases, in generation order.
    pub test_cases: Vec<TestCase>,
}

impl TicketRecord {
    /// Create a new ticket record.
    pub fn new(
        ticket_id: impl Into<String>,
        description: impl Into<String>,
        test_cases: Vec<TestCase>,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            description: description.into(),
            test_cases,
        }
    }
}

/// Request body for test-case generation.
///
/// Credentials are optional; when absent the server falls back to its
/// configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    /// Ticket to generate test cases for.
    pub ticket_id: String,

    /// Tracker username override.
    #[serde(default)]
    pub username: Option<String>,

    /// Tracker API token override.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Tracker base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Request body for semantic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,

    /// Maximum number of results.
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    5
}

/// Response body for semantic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching records, closest first.
    pub results: Vec<TicketRecord>,

    /// Informational message, set when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_missing_fields_default() {
        let tc: TestCase = serde_json::from_str(r#"{"test_id": "TC-001"}"#).unwrap();
        assert_eq!(tc.test_id, "TC-001");
        assert_eq!(tc.title, "");
        assert!(tc.steps.is_empty());
        assert_eq!(tc.expected_result, "");
    }

    #[test]
    fn test_case_structural_equality() {
        let a = TestCase::new("TC-001", "t", vec!["a".to_string()], "r");
        let b = TestCase::new("TC-001", "t", vec!["a".to_string()], "r");
        assert_eq!(a, b);
    }

    #[test]
    fn ticket_record_round_trips_through_json() {
        let record = TicketRecord::new(
            "PROJ-42",
            "login flow",
            vec![TestCase::new("TC-001", "t", vec!["a".to_string()], "r")],
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: TicketRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn search_request_default_limit() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "login"}"#).unwrap();
        assert_eq!(req.limit, 5);
    }
}
