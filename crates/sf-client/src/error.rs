//! Error types shared by every simpleforce crate.

use crate::classify::ClassifiedError;
use crate::retry::is_retryable;

/// Result type alias for simpleforce operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for simpleforce operations.
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

    /// The error returned when an operation needs a session and there is none.
    pub fn not_authenticated() -> Self {
        Self::new(ErrorKind::Authentication("authentication failure".to_string()))
    }

    /// A generic failure for unexpected response shapes.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Failure(message.into()))
    }

    /// Build the error for a non-2xx response from its status and classified body.
    pub fn remote(status: u16, error: ClassifiedError) -> Self {
        Self::new(ErrorKind::Remote { status, error })
    }

    /// Convert a retryable remote error into the retry sentinel.
    ///
    /// Errors that are not retryable are returned unchanged.
    pub fn into_retry_signal(self) -> Self {
        match self.kind {
            ErrorKind::Remote { status, .. } if is_retryable(status) => {
                Self::with_source(ErrorKind::Retry { status }, self)
            }
            _ => self,
        }
    }

    /// Returns true if the caller should back off and resubmit.
    ///
    /// This holds for the retry sentinel and for any classified remote error
    /// whose status is in the retryable set.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is the retry sentinel.
    pub fn is_retry_signal(&self) -> bool {
        matches!(self.kind, ErrorKind::Retry { .. })
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if this is a generic failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Failure(_))
    }

    /// HTTP status code of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Remote { status, .. } | ErrorKind::Retry { status } => Some(*status),
            _ => None,
        }
    }

    /// The classified remote error, looking through the retry sentinel.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match &self.kind {
            ErrorKind::Remote { error, .. } => Some(error),
            ErrorKind::Retry { .. } => self
                .source
                .as_ref()
                .and_then(|s| s.downcast_ref::<Error>())
                .and_then(Error::classified),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Not logged in, or the login was rejected.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Requested data does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered with a retryable status; back off and resubmit.
    #[error("Retry call (HTTP {status})")]
    Retry { status: u16 },

    /// Salesforce error parsed from a JSON or SOAP fault body.
    #[error("Salesforce API error ({status}): {error}")]
    Remote { status: u16, error: ClassifiedError },

    /// Generic failure when a response has an unexpected shape.
    #[error("General failure: {0}")]
    Failure(String),

    /// OAuth error reported inside a token payload.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other transport-level failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// XML deserialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// A caller-supplied value was rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Retry { .. } => true,
            ErrorKind::Remote { status, .. } => is_retryable(*status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Http(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}
