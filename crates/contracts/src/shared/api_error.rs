//! Error taxonomy for calls against the admin REST API.
//!
//! The frontend HTTP layer converts every failed request into an [`ApiError`];
//! pages decide how to render it via [`ApiError::is_retryable`] and
//! [`ApiError::user_message`].

use serde::Deserialize;
use thiserror::Error;

/// Text shown in the "failed to load" banner for network, timeout and 5xx errors.
pub const GENERIC_LOAD_ERROR: &str = "Failed to load data. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// 4xx other than 401/403. The message comes from the response body.
    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Error body returned by the backend: `{"error": "...", "message": "..."}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `message` wins over `error`; blank strings count as absent.
    pub fn best_message(&self) -> Option<String> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string)
    }
}

impl ApiError {
    /// Build an error from a non-2xx status and the raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.best_message());

        match status {
            401 => Self::Unauthorized(parsed.unwrap_or_else(|| "Unauthorized".to_string())),
            403 => Self::Forbidden(
                parsed.unwrap_or_else(|| "Insufficient privileges".to_string()),
            ),
            400..=499 => Self::Validation {
                status,
                message: parsed.unwrap_or_else(|| format!("Request failed with status {}", status)),
            },
            _ => Self::Server {
                status,
                message: parsed.unwrap_or_else(|| format!("Server error: {}", status)),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Network, timeout and 5xx errors get the banner with a manual retry button.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Server { .. }
        )
    }

    /// Text shown to the admin. 4xx messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::Server { .. } => {
                GENERIC_LOAD_ERROR.to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ApiError::from_status(
            400,
            r#"{"error":"Bad Request","message":"A team can have at most 3 captains"}"#,
        );
        assert_eq!(
            err,
            ApiError::Validation {
                status: 400,
                message: "A team can have at most 3 captains".to_string()
            }
        );
        assert!(err.user_message().contains("at most 3 captains"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_field_used_when_message_missing() {
        let err = ApiError::from_status(422, r#"{"error":"Invalid transition"}"#);
        assert_eq!(err.user_message(), "Invalid transition");
    }

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Unauthorized(_)));
        let forbidden = ApiError::from_status(403, "not json");
        assert_eq!(forbidden.user_message(), "Insufficient privileges");
        assert_eq!(forbidden.status(), Some(403));
    }

    #[test]
    fn test_server_errors_use_generic_banner() {
        let err = ApiError::from_status(503, r#"{"message":"db down"}"#);
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), GENERIC_LOAD_ERROR);
        assert_eq!(err.to_string(), "db down");

        assert!(ApiError::Timeout(30).is_retryable());
        assert!(ApiError::Network("offline".into()).is_retryable());
    }
}
