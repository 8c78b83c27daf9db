//! Error taxonomy surfaced to the host

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the RPC dispatcher and the insight pipeline
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("hex signature response is not ok for this signature : {selector}, status: {status}")]
    UpstreamStatus { selector: String, status: u16 },

    #[error("malformed signature registry response for {selector}: {reason}")]
    UpstreamBody { selector: String, reason: String },

    #[error("signature registry request failed for {selector}: {source}")]
    UpstreamTransport {
        selector: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no signature found for selector {selector}")]
    NotFound { selector: String },

    #[error("parameter count mismatch for {signature}: {types} types, {values} decoded values")]
    Mismatch {
        signature: String,
        types: usize,
        values: usize,
    },

    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("host request failed: {0}")]
    Host(String),
}

/// Category names the host sees for each error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInputError,
    UpstreamError,
    NotFoundError,
    MismatchError,
    MethodNotFoundError,
    HostError,
}

impl InsightError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInputError,
            Self::UpstreamStatus { .. }
            | Self::UpstreamBody { .. }
            | Self::UpstreamTransport { .. } => ErrorKind::UpstreamError,
            Self::NotFound { .. } => ErrorKind::NotFoundError,
            Self::Mismatch { .. } => ErrorKind::MismatchError,
            Self::MethodNotFound { .. } => ErrorKind::MethodNotFoundError,
            Self::Host(_) => ErrorKind::HostError,
        }
    }
}

/// Serializable error body written back to the host
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&InsightError> for ErrorReport {
    fn from(err: &InsightError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_names_selector_and_status() {
        let err = InsightError::UpstreamStatus {
            selector: "0xa9059cbb".into(),
            status: 502,
        };
        let msg = err.to_string();
        assert!(msg.contains("0xa9059cbb"));
        assert!(msg.contains("502"));
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
    }

    #[test]
    fn test_error_report_serializes_kind_name() {
        let err = InsightError::MethodNotFound {
            method: "goodbye".into(),
        };
        let report = serde_json::to_value(ErrorReport::from(&err)).unwrap();
        assert_eq!(report["kind"], "MethodNotFoundError");
        assert_eq!(report["message"], "Method not found: goodbye");
    }
}
