//! Error types for forcelink-rest.

use forcelink_client::ApiError;

/// Result type alias for forcelink-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcelink-rest operations.
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

    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Precondition(message.into()))
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode(message.into()))
    }

    /// Returns true if the call was refused locally, before any network I/O.
    pub fn is_precondition(&self) -> bool {
        matches!(self.kind, ErrorKind::Precondition(_))
    }

    /// Returns true if there is no usable session (never logged in, or login failed).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotAuthenticated | ErrorKind::Authentication(_) | ErrorKind::LoginFailed(_)
        )
    }

    /// Returns true if a 2xx body did not have the expected shape.
    pub fn is_decode_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode(_))
    }

    /// The classified remote error, for non-2xx responses (including login faults).
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.kind {
            ErrorKind::Api(err) | ErrorKind::LoginFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing type, session or identity; raised before any request is sent.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The session has not been authenticated yet.
    #[error("Not authenticated: log in or set a session first")]
    NotAuthenticated,

    /// The login endpoint rejected the credentials.
    #[error("Login failed: {0}")]
    LoginFailed(ApiError),

    /// Credentials could not be used (missing or empty values).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Non-2xx response, normalized by the error classifier.
    #[error("{0}")]
    Api(ApiError),

    /// The server answered 2xx but reported the write as unsuccessful.
    #[error("Operation rejected: {0}")]
    Rejected(String),

    /// A 2xx body did not match the expected wire shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request never produced a response (timeout, refused connection, bad URL).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local I/O failure while writing a download.
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        use forcelink_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::Api(api) => ErrorKind::Api(api.clone()),
            ClientKind::Decode(msg) => ErrorKind::Decode(msg.clone()),
            ClientKind::Serialization(msg) => ErrorKind::Serialization(msg.clone()),
            ClientKind::Io(msg) => ErrorKind::Io(msg.clone()),
            ClientKind::Config(msg) => ErrorKind::Config(msg.clone()),
            ClientKind::Timeout
            | ClientKind::Connection(_)
            | ClientKind::InvalidUrl(_)
            | ClientKind::Other(_) => ErrorKind::Transport(err.kind.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<forcelink_auth::Error> for Error {
    fn from(err: forcelink_auth::Error) -> Self {
        use forcelink_auth::ErrorKind as AuthKind;

        let kind = match &err.kind {
            AuthKind::LoginFailed(api) => ErrorKind::LoginFailed(api.clone()),
            AuthKind::InvalidResponse(msg) => ErrorKind::Decode(msg.clone()),
            AuthKind::InvalidCredentials(msg) => ErrorKind::Authentication(msg.clone()),
            AuthKind::EnvVar(var) => {
                ErrorKind::Authentication(format!("environment variable {} not set", var))
            }
            AuthKind::Http(msg) => ErrorKind::Transport(msg.clone()),
        };
        Error::with_source(kind, err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}
