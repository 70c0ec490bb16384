use serde::Deserialize;
use thiserror::Error;

/// Message shown when a failure carries no usable text of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status with a JSON `{"error": ...}` body.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Non-success status whose body could not be read as an error object.
    #[error("Unexpected status {status}: {body}")]
    Unexpected {
        status: u16,
        reason: String,
        body: String,
    },

    /// Success status but the body did not decode into the expected type.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());

        match message {
            Some(message) => ApiError::Server {
                status: status.as_u16(),
                message,
            },
            None => ApiError::Unexpected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body: Self::truncate_body(body),
            },
        }
    }

    /// The one string shown to the user for any failure.
    ///
    /// Server-provided messages win; everything else collapses to a short
    /// generic line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Unexpected { status, reason, .. } if !reason.is_empty() => {
                format!("{} {}", status, reason)
            }
            ApiError::Unexpected { status, .. } => {
                format!("{} ({})", GENERIC_FAILURE_MESSAGE, status)
            }
            ApiError::Network(_) | ApiError::InvalidResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Unexpected { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_structured_error_body() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error": "athlete already entered"}"#);
        assert!(matches!(err, ApiError::Server { status: 400, .. }));
        assert_eq!(err.user_message(), "athlete already entered");
    }

    #[test]
    fn test_unparseable_body_falls_back() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, ApiError::Unexpected { status: 500, .. }));
        assert_eq!(err.user_message(), "500 Internal Server Error");
    }

    #[test]
    fn test_empty_error_field_falls_back() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"error": ""}"#);
        assert_eq!(err.user_message(), "404 Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, &body);
        match err {
            ApiError::Unexpected { body, .. } => assert!(body.contains("truncated")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_response_is_generic() {
        let err = ApiError::InvalidResponse("missing field `meet`".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
