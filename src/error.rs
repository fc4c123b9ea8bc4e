use crate::retry::StatusClass;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Builder(reqwest::Error),
    /// Failure before a response status was observed (DNS, connect, TLS,
    /// timeout, invalid URL or header), or while reading a response body.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Response status outside the success range.
    #[error(transparent)]
    Server(#[from] ServerError),
    /// Request body could not be encoded as JSON. No request was sent.
    #[error("failed to serialize request body: {0}")]
    Serialize(serde_json::Error),
    /// Successful response body could not be decoded into the result sink.
    #[error("failed to deserialize response body: {source}; body: {body}")]
    Deserialize {
        source: serde_json::Error,
        /// Raw response body text.
        body: String,
    },
}

impl RestError {
    /// HTTP status code, when the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server(err) => Some(err.status_code),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }

    /// Whether the executor would have retried this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server(err) if err.is_retryable())
    }
}

/// Non-success HTTP response captured with its body text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("http server error - status code: {status_code}; body: {body}")]
pub struct ServerError {
    pub status_code: u16,
    pub body: String,
}

impl ServerError {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// `true` for statuses in the inclusive range 500..=511.
    pub fn is_retryable(&self) -> bool {
        StatusClass::of(self.status_code) == StatusClass::Retryable
    }
}
