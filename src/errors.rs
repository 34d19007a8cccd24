use std::fmt;

/// Error types returned by the Ridder client.
#[derive(Debug)]
pub enum RidderError {
    /// The service was constructed with a missing base URL or API key.
    ConfigurationError(String),
    /// Network, timeout or connection failure from the HTTP client.
    TransportError(reqwest::Error),
    /// Ridder answered with a non-success status.
    RemoteError {
        /// HTTP status code of the response.
        status: u16,
        /// The decoded `error` field, or a generic status message.
        message: String,
        /// Server-side stack trace when the error body carried one.
        stack_trace: Option<String>,
    },
    /// The response body could not be decoded into the expected type.
    DecodeError(String),
    /// The request body could not be encoded as JSON.
    SerializationError(String),
}

impl RidderError {
    /// HTTP status of a remote error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RidderError::RemoteError { status, .. } => Some(*status),
            RidderError::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a request should be attempted again.
    ///
    /// Only connection and timeout failures qualify; a POST that reached the
    /// server is never replayed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RidderError::TransportError(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

impl fmt::Display for RidderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RidderError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            RidderError::TransportError(e) => write!(f, "Transport error: {}", e),
            RidderError::RemoteError {
                status, message, ..
            } => write!(f, "Remote error ({}): {}", status, message),
            RidderError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            RidderError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for RidderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RidderError::TransportError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RidderError {
    /// Converts a `reqwest::Error` into a `RidderError`.
    fn from(err: reqwest::Error) -> Self {
        RidderError::TransportError(err)
    }
}

impl From<serde_json::Error> for RidderError {
    /// Converts a `serde_json::Error` raised while reading a response body.
    fn from(err: serde_json::Error) -> Self {
        RidderError::DecodeError(err.to_string())
    }
}
