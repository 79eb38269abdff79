//! Remote failure taxonomy.

use std::fmt;
use thiserror::Error;

/// Classification of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The server could not be reached.
    Connect,
    /// The request or response timed out.
    Timeout,
    /// The request could not be built or sent.
    Request,
    /// Anything else reported by the HTTP client.
    Other,
}

impl TransportKind {
    /// Returns the kind as used in the `error_kind` log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Request => "request",
            Self::Other => "unknown",
        }
    }

    /// Classifies a `reqwest` error.
    #[must_use]
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect
        } else if err.is_request() || err.is_builder() {
            Self::Request
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call against a remote collection.
///
/// The store treats every variant the same way (degrade to local mode); the
/// distinction is kept for logs and for the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never produced an HTTP response.
    #[error("{kind} error: {message}")]
    Transport {
        /// Failure classification.
        kind: TransportKind,
        /// Client error text.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body was not what the collection contract promises.
    #[error("invalid response payload: {0}")]
    Payload(String),
}

impl RemoteError {
    /// Returns the `error_kind` log value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { kind, .. } => kind.as_str(),
            Self::Status { .. } => "status",
            Self::Payload(_) => "payload",
        }
    }

    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        Self::Transport {
            kind: TransportKind::classify(err),
            message: err.to_string(),
        }
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Tries JSON `{"message": ...}` then `{"error": ...}`, then the raw text,
/// then falls back to `HTTP <status>`.
#[must_use]
pub fn extract_error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(text) = map.get(key).and_then(crate::models::value_text) {
                if !text.trim().is_empty() {
                    return text;
                }
            }
        }
    }
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(404, r#"{"message":"Product not found"}"#, "Product not found" ; "json message")]
    #[test_case(400, r#"{"error":"Bad Request"}"#, "Bad Request" ; "json error")]
    #[test_case(500, "Internal failure", "Internal failure" ; "raw text")]
    #[test_case(503, "", "HTTP 503" ; "empty body")]
    #[test_case(502, "   \n", "HTTP 502" ; "whitespace body")]
    #[test_case(400, r#"{"message":""}"#, r#"{"message":""}"# ; "blank json message falls back to text")]
    fn test_extract_error_message(status: u16, body: &str, expected: &str) {
        assert_eq!(extract_error_message(status, body), expected);
    }

    #[test]
    fn test_status_error_helpers() {
        let err = RemoteError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.kind(), "status");
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_transport_display() {
        let err = RemoteError::Transport {
            kind: TransportKind::Connect,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "connect error: connection refused");
        assert_eq!(err.kind(), "connect");
        assert_eq!(err.status(), None);
    }
}
