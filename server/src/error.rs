//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use casegen_core::{CoreError, TrackerError};

/// Error type returned by every handler.
///
/// Maps the orchestrator's error taxonomy onto HTTP statuses so a caller can
/// distinguish credential, transport, and parse failures.
#[derive(Debug)]
pub enum ApiError {
    /// An orchestrator failure.
    Core(CoreError),

    /// The requested record does not exist.
    NotFound(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::Tracker(TrackerError::MissingCredentials)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Core(CoreError::Tracker(TrackerError::Auth { .. })) => StatusCode::UNAUTHORIZED,
            Self::Core(CoreError::Tracker(TrackerError::NotFound { .. })) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::Tracker(TrackerError::Transport { .. })) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Core(CoreError::Generation(_) | CoreError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::NotFound(detail) => detail.clone(),
            Self::Core(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            error!("Request failed: {detail}");
        }
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casegen_pipeline::GenerationError;

    #[test]
    fn missing_credentials_map_to_bad_request() {
        let err = ApiError::from(CoreError::Tracker(TrackerError::MissingCredentials));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_rejection_maps_to_unauthorized() {
        let err = ApiError::from(CoreError::Tracker(TrackerError::Auth {
            status: 403,
            message: "nope".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_ticket_maps_to_not_found() {
        let err = ApiError::from(CoreError::Tracker(TrackerError::NotFound {
            ticket_id: "PROJ-404".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn generation_failure_maps_to_internal_error() {
        let err = ApiError::from(CoreError::Generation(GenerationError::Parse {
            reason: "bad".to_string(),
            snippet: "raw".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn absent_record_maps_to_not_found() {
        let err = ApiError::NotFound("no test cases".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "no test cases");
    }
}
