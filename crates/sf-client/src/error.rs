//! Error types for forcelink-client.

use crate::api_error::ApiError;

/// Result type alias for forcelink-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcelink-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The classified remote error, if the server answered with a non-2xx status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.kind {
            ErrorKind::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if a 2xx body did not have the expected shape.
    pub fn is_decode_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode(_))
    }

    /// Returns true if the request never produced an HTTP response.
    pub fn is_transport_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout | ErrorKind::Connection(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Non-2xx response, normalized by [`crate::classify`].
    #[error("{0}")]
    Api(ApiError),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A 2xx response body did not match the expected wire shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failure (download sinks).
    #[error("IO error: {0}")]
    Io(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::new(ErrorKind::Api(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Decode(err.to_string())
        } else if err.is_builder() {
            ErrorKind::InvalidUrl(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessor() {
        let err: Error = ApiError {
            status: 404,
            error_code: Some("NOT_FOUND".into()),
            message: "The requested resource does not exist".into(),
            fields: vec![],
            body: String::new(),
        }
        .into();

        let api = err.api_error().expect("should carry an ApiError");
        assert_eq!(api.status, 404);
        assert_eq!(api.error_code.as_deref(), Some("NOT_FOUND"));
        assert!(!err.is_decode_error());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Connection("refused".into()),
                "Connection error: refused",
            ),
            (
                ErrorKind::Decode("missing field `id`".into()),
                "Decode error: missing field `id`",
            ),
            (
                ErrorKind::Serialization("not a map".into()),
                "Serialization error: not a map",
            ),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (ErrorKind::Io("disk full".into()), "IO error: disk full"),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_transport_predicate() {
        assert!(Error::new(ErrorKind::Timeout).is_transport_error());
        assert!(Error::new(ErrorKind::Connection("reset".into())).is_transport_error());
        assert!(!Error::new(ErrorKind::Decode("bad".into())).is_transport_error());
    }

    #[test]
    fn test_from_io_error() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
        assert_eq!(err.to_string(), "IO error: disk full");
    }
}
