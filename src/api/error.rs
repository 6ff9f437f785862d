//! API error types for the feedback client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the feedback API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connection, TLS, I/O).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL is not usable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no details provided"))]
    Rejected {
        status: StatusCode,
        /// The `message` field of the error body, when the server sent one.
        message: Option<String>,
    },

    /// The server answered with something other than JSON.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// The payload was JSON but not the expected shape.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status and the raw response body.
    ///
    /// The body is inspected for a JSON `message` field; anything else is
    /// discarded.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ApiError::Rejected {
            status,
            message: extract_message(body),
        }
    }

    /// The message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the request failed before the server could answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::InvalidUrl(_))
    }
}

/// Pull a non-empty `message` string out of a JSON body.
fn extract_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    json.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Rating must be between 1 and 5"}"#,
        );
        assert_eq!(err.server_message(), Some("Rating must be between 1 and 5"));
    }

    #[test]
    fn test_from_status_ignores_non_json_body() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(message.is_none());
            }
            _ => panic!("Expected Rejected error"),
        }
    }

    #[test]
    fn test_from_status_ignores_empty_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message": ""}"#);
        assert!(err.server_message().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message": "No route"}"#);
        assert_eq!(err.to_string(), "HTTP 404 Not Found: No route");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "HTTP 404 Not Found: no details provided");
    }

    #[test]
    fn test_is_transport() {
        assert!(ApiError::InvalidUrl("nope".to_string()).is_transport());
        assert!(!ApiError::InvalidResponse("bad".to_string()).is_transport());
        assert!(!ApiError::from_status(StatusCode::BAD_REQUEST, "").is_transport());
    }
}
