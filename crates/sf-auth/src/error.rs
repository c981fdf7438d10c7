//! Error types for forcelink-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

use forcelink_client::ApiError;

/// Result type alias for forcelink-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcelink-auth operations.
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

    /// The classified fault returned by the login endpoint, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.kind {
            ErrorKind::LoginFailed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the login endpoint answered 2xx with an unusable body.
    pub fn is_decode_error(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidResponse(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The login endpoint rejected the credentials (or failed).
    #[error("Login failed: {0}")]
    LoginFailed(ApiError),

    /// The login response could not be read.
    #[error("Invalid login response: {0}")]
    InvalidResponse(String),

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Transport failure while talking to the login endpoint.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        let kind = match &err.kind {
            forcelink_client::ErrorKind::Api(api) => ErrorKind::LoginFailed(api.clone()),
            forcelink_client::ErrorKind::Decode(msg) => ErrorKind::InvalidResponse(msg.clone()),
            _ => {
                let message = err.to_string();
                if message.contains("Bearer") || message.contains("sessionId") {
                    ErrorKind::Http("Client error (details redacted for security)".to_string())
                } else {
                    ErrorKind::Http(message)
                }
            }
        };
        Error::with_source(kind, err)
    }
}
