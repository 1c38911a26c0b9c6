use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of API errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No session token: local precondition failure, no request was sent
    MissingToken,
    /// No response received (connect failure, timeout, dropped connection)
    Transport,
    /// Non-success HTTP status returned by the backend
    HttpStatus,
    /// Response received but the body could not be decoded
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::MissingToken => write!(f, "missing_token"),
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the API layer with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw response body)
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a missing-token error. No request was made.
    pub fn missing_token() -> Self {
        Self::new(ApiErrorKind::MissingToken, "No session token")
    }

    /// Creates a transport error from a send failure.
    pub fn transport(err: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Transport, err.to_string())
    }

    /// Creates an HTTP status error.
    ///
    /// Pulls a clean message out of `{message}` or `{error: {message}}`
    /// bodies when the backend provides one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {}", status);
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(msg) = extract_message(&json)
            {
                return Self {
                    kind: ApiErrorKind::HttpStatus,
                    message: format!("HTTP {}: {}", status, msg),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a parse error.
    pub fn parse(err: impl fmt::Display) -> Self {
        Self::new(ApiErrorKind::Parse, format!("Invalid response: {}", err))
    }
}

/// Looks for a human-readable message in a JSON error body.
fn extract_message(json: &Value) -> Option<&str> {
    if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
        return Some(msg);
    }
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_flat_message() {
        let err = ApiError::http_status(401, r#"{"success":false,"message":"Invalid token"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 401: Invalid token");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_http_status_extracts_nested_message() {
        let err = ApiError::http_status(500, r#"{"error":{"message":"boom"}}"#);
        assert_eq!(err.message, "HTTP 500: boom");
    }

    #[test]
    fn test_http_status_plain_body() {
        let err = ApiError::http_status(404, "not found");
        assert_eq!(err.message, "HTTP 404");
        assert_eq!(err.details.as_deref(), Some("not found"));
    }

    #[test]
    fn test_missing_token_kind() {
        let err = ApiError::missing_token();
        assert_eq!(err.kind, ApiErrorKind::MissingToken);
    }
}
