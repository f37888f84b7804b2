//! Feedback transport port
//!
//! Defines how the application layer reaches the upstream feedback platform.
//! The HTTP adapter lives in the infrastructure layer.

use async_trait::async_trait;
use featurebase_domain::ApiRequest;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while sending a request upstream
#[derive(Error, Debug)]
pub enum TransportError {
    /// A required setting was never supplied. Raised before any network I/O.
    #[error("{variable} environment variable is required for {purpose}")]
    ConfigurationMissing {
        variable: &'static str,
        purpose: String,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    TransportFailure { status: u16, message: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidResponseBody(String),

    /// The request never produced a response (DNS, refused, TLS).
    #[error("Network error: {0}")]
    Network(String),
}

impl TransportError {
    /// HTTP status of a failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::TransportFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway to the feedback platform's REST API.
///
/// One call sends one request and yields the decoded JSON body. No retries.
#[async_trait]
pub trait FeedbackTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_message() {
        let err = TransportError::TransportFailure {
            status: 404,
            message: r#"{"message":"not found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"HTTP 404: {"message":"not found"}"#);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_configuration_missing_message() {
        let err = TransportError::ConfigurationMissing {
            variable: "FEATUREBASE_ORG_URL",
            purpose: "resolve_post_slug".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "FEATUREBASE_ORG_URL environment variable is required for resolve_post_slug"
        );
        assert_eq!(err.status(), None);
    }
}
