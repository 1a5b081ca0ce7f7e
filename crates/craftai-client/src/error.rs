//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service rejected the request (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid token (HTTP 401).
    #[error("Credentials rejected: {0}")]
    Credentials(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response.
    #[error("Internal error ({status}): {message}")]
    Internal {
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Agent identifier failed local checks.
    #[error("Invalid agent id: {0}")]
    InvalidAgentId(String),

    /// Model failed local validation.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Timestamp or timezone could not be used.
    #[error("Time error: {0}")]
    Time(String),

    /// A decision request could not be formed.
    #[error("Decision error: {0}")]
    Decision(String),
}

impl Error {
    /// Map a non-success HTTP status to an error.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Error::BadRequest(message),
            401 => Error::Credentials(message),
            404 => Error::NotFound(message),
            _ => Error::Internal { status, message },
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a credentials error.
    pub fn is_credentials_error(&self) -> bool {
        matches!(self, Error::Credentials(_))
    }

    /// Check if the service rejected the request as malformed.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Error::BadRequest(_))
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Internal { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the service.
///
/// Older deployments send `error`, newer ones `message`.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(Error::from_status(400, "x".into()).is_bad_request());
        assert!(Error::from_status(401, "x".into()).is_credentials_error());
        assert!(Error::from_status(404, "x".into()).is_not_found());
        assert!(Error::from_status(500, "x".into()).is_server_error());

        let err = Error::from_status(409, "conflict".into());
        assert!(matches!(err, Error::Internal { status: 409, .. }));
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_error_response_prefers_message() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message": "agent exists", "error": "Conflict"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("agent exists"));

        let body: ErrorResponse = serde_json::from_str(r#"{"error": "Unauthorized"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Unauthorized"));

        let body: ErrorResponse = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
