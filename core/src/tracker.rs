//! Ticket-tracker client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::debug;

use crate::error::TrackerError;

/// Timeout for tracker lookups.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Sentinel credentials that bypass the live tracker with a fixed
/// description, so the full pipeline can be exercised end-to-end without
/// real credentials.
const TEST_USERNAME: &str = "test_user";
const TEST_API_TOKEN: &str = "test_token";

/// Credentials for the ticket tracker.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Account username or email.
    pub username: String,

    /// API token.
    pub api_token: String,

    /// Tracker base URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
}

impl Credentials {
    /// Create credentials from their parts.
    pub fn new(
        username: impl Into<String>,
        api_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            api_token: api_token.into(),
            base_url: base_url.into(),
        }
    }

    /// Whether these are the designated test credentials.
    pub fn is_test_sentinel(&self) -> bool {
        self.username == TEST_USERNAME && self.api_token == TEST_API_TOKEN
    }
}

/// Fixed description returned for the test sentinel. Deterministic so
/// end-to-end runs are reproducible.
pub fn sentinel_description() -> String {
    "\
As a user, I want to log in to the system with my credentials so that I can \
access my account and perform operations.

Acceptance Criteria:
1. User can enter username and password
2. System validates the credentials
3. User is redirected to the dashboard on successful login
4. An error message is shown for invalid credentials
5. A \"Forgot Password\" link is available"
        .to_string()
}

/// Trait for ticket trackers: a single fetch-by-id capability.
#[async_trait]
pub trait TicketTracker: Send + Sync {
    /// Fetch the description of a ticket.
    async fn fetch(
        &self,
        ticket_id: &str,
        credentials: &Credentials,
    ) -> std::result::Result<String, TrackerError>;
}

/// Jira REST tracker.
pub struct JiraTracker {
    client: reqwest::Client,
    timeout: Duration,
}

impl JiraTracker {
    /// Create a new tracker client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Set the lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for JiraTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketTracker for JiraTracker {
    async fn fetch(
        &self,
        ticket_id: &str,
        credentials: &Credentials,
    ) -> std::result::Result<String, TrackerError> {
        if credentials.username.is_empty()
            || credentials.api_token.is_empty()
            || credentials.base_url.is_empty()
        {
            return Err(TrackerError::MissingCredentials);
        }

        let base = credentials.base_url.trim_end_matches('/');
        let url = format!("{base}/rest/api/2/issue/{ticket_id}");
        let auth = BASE64.encode(format!(
            "{}:{}",
            credentials.username, credentials.api_token
        ));

        debug!("Fetching ticket {ticket_id} from {base}");
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Basic {auth}"))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TrackerError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => {}
            401 | 403 => {
                let message = response.text().await.unwrap_or_default();
                return Err(TrackerError::Auth {
                    status: status.as_u16(),
                    message,
                });
            }
            404 => {
                return Err(TrackerError::NotFound {
                    ticket_id: ticket_id.to_string(),
                });
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                return Err(TrackerError::Transport {
                    message: format!("status {status}: {message}"),
                });
            }
        }

        let issue: IssueResponse =
            response.json().await.map_err(|e| TrackerError::Transport {
                message: e.to_string(),
            })?;

        Ok(issue
            .fields
            .description
            .unwrap_or_else(|| "No description available".to_string()))
    }
}

/// Tracker issue response, reduced to the one field we read.
#[derive(Debug, Deserialize)]
struct IssueResponse {
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct IssueFields {
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials_for(server: &MockServer) -> Credentials {
        Credentials::new("qa@example.com", "secret", server.uri())
    }

    #[tokio::test]
    async fn fetch_returns_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-1"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "fields": {"description": "Users cannot reset passwords"}
            })))
            .mount(&server)
            .await;

        let tracker = JiraTracker::new();
        let description = tracker
            .fetch("PROJ-1", &credentials_for(&server))
            .await
            .unwrap();
        assert_eq!(description, "Users cannot reset passwords");
    }

    #[tokio::test]
    async fn null_description_gets_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "fields": {"description": null}
            })))
            .mount(&server)
            .await;

        let tracker = JiraTracker::new();
        let description = tracker
            .fetch("PROJ-1", &credentials_for(&server))
            .await
            .unwrap();
        assert_eq!(description, "No description available");
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let tracker = JiraTracker::new();
        let err = tracker
            .fetch("PROJ-1", &Credentials::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingCredentials));
    }

    #[tokio::test]
    async fn rejected_credentials_are_auth_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-1"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let tracker = JiraTracker::new();
        let err = tracker
            .fetch("PROJ-1", &credentials_for(&server))
            .await
            .unwrap_err();
        match err {
            TrackerError::Auth { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad token");
            }
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_ticket_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tracker = JiraTracker::new();
        let err = tracker
            .fetch("PROJ-404", &credentials_for(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound { .. }));
    }

    #[test]
    fn sentinel_detection() {
        let sentinel = Credentials::new("test_user", "test_token", "");
        assert!(sentinel.is_test_sentinel());

        let real = Credentials::new("qa@example.com", "secret", "https://jira.example.com");
        assert!(!real.is_test_sentinel());
    }
}
