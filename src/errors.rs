use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

pub const LIVENESS_CONFIG_MISSING: &str = "Jira environment variables are not properly set";
pub const ISSUE_CONFIG_MISSING: &str =
    "JIRA_API_URL, JIRA_USERNAME, JIRA_API_TOKEN and JIRA_PROJECT_KEY must be set.";

#[derive(Debug)]
pub enum RelayError {
    // Configuration errors
    ConfigMissing(&'static str),
    ConfigInvalid(String),

    // Inbound request errors
    InvalidPayload(StatusCode, String),

    // Jira errors
    JiraAuthFailed(u16),
    JiraApiError(u16, String),
    JiraUnhealthy,

    // Network errors
    NetworkError(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::ConfigMissing(_) | RelayError::ConfigInvalid(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::InvalidPayload(status, _) => *status,
            RelayError::JiraAuthFailed(_)
            | RelayError::JiraApiError(_, _)
            | RelayError::JiraUnhealthy
            | RelayError::NetworkError(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            RelayError::ConfigMissing(msg) => write!(f, "{}", msg),
            RelayError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),

            RelayError::InvalidPayload(_, msg) => write!(f, "{}", msg),

            // Jira errors
            RelayError::JiraAuthFailed(status) => {
                write!(f, "Jira authentication failed ({})", status)
            }
            RelayError::JiraApiError(status, body) => {
                write!(f, "Jira API error ({}): {}", status, body)
            }
            RelayError::JiraUnhealthy => write!(f, "Jira API is not healthy"),

            RelayError::NetworkError(msg) => write!(f, "Failed to connect to Jira API: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<::config::ConfigError> for RelayError {
    fn from(err: ::config::ConfigError) -> Self {
        RelayError::ConfigInvalid(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::InvalidPayload(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

// Statuses are classified by the Jira client; a reqwest error here means
// the request never got an answer.
impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::NetworkError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_map_to_500() {
        let err = RelayError::ConfigMissing(LIVENESS_CONFIG_MISSING);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), LIVENESS_CONFIG_MISSING);
    }

    #[test]
    fn test_downstream_errors_map_to_503() {
        assert_eq!(
            RelayError::JiraUnhealthy.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            RelayError::JiraAuthFailed(401).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_invalid_payload_status() {
        let err = RelayError::InvalidPayload(StatusCode::UNPROCESSABLE_ENTITY, "bad".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_bad_json_is_unprocessable() {
        let err: RelayError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_jira_api_error_display() {
        let err = RelayError::JiraApiError(500, "boom".into());
        assert_eq!(err.to_string(), "Jira API error (500): boom");
    }
}
