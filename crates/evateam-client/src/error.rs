//! Client error types.

use thiserror::Error;

/// Client error type.
///
/// Each variant corresponds to one phase of a call, so callers can tell a
/// remote "not found" apart from a dropped connection without parsing text.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid client configuration (missing base URL or token).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Query was built without a source entity.
    #[error("table name not found in query, use from() to set the entity")]
    MissingEntity,

    /// Request body could not be serialized.
    #[error("marshal request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("API error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Server answered 200 with an `error` object in the body.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Remote error code.
        code: i64,
        /// Remote error message.
        message: String,
    },

    /// Response body is not a valid envelope or does not fit the target type.
    #[error("unmarshal response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a domain error reported inside a 200 body.
    pub fn is_rpc(&self) -> bool {
        matches!(self, Error::Rpc { .. })
    }

    /// Remote error code, if this is a domain error.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Error::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if the call ran past the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Check if the failure happened below the RPC layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// HTTP status associated with the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Rpc {
            code: -32000,
            message: "Task not found".to_string(),
        };
        assert!(err.to_string().contains("-32000"));
        assert!(err.to_string().contains("Task not found"));
        assert!(err.is_rpc());
        assert_eq!(err.rpc_code(), Some(-32000));

        let err = Error::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_rpc());
    }

    #[test]
    fn test_missing_entity_names_from() {
        let err = Error::MissingEntity;
        assert!(err.to_string().contains("from()"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_decode_is_distinct_from_rpc() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::Decode(json_err);
        assert!(err.to_string().starts_with("unmarshal response body"));
        assert!(!err.is_rpc());
        assert_eq!(err.rpc_code(), None);
    }

    #[test]
    fn test_url_error_conversion() {
        let parse_err = url::Url::parse("://invalid").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
