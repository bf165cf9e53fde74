//! Client error types.

use argus_core::TransportError;
use thiserror::Error;

/// Errors from the space client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP request itself failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server's reply did not parse as JSON.
    #[error("malformed json reply: {0}")]
    Json(#[from] serde_json::Error),

    /// The server's reply did not follow the expected protocol shape.
    #[error("unexpected reply shape: {0}")]
    Protocol(String),

    /// The inference job ended with an error event.
    #[error("inference job failed: {0}")]
    JobFailed(String),
}

/// Convenience result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Folds client errors into the transport taxonomy the workflow
/// understands. Service-level failures never take this path; they arrive
/// as ordinary reply text.
impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => TransportError::Timeout,
            ClientError::Http(e) => TransportError::Network(e.to_string()),
            ClientError::Json(e) => TransportError::Protocol(e.to_string()),
            ClientError::Protocol(msg) => TransportError::Protocol(msg),
            ClientError::JobFailed(msg) => TransportError::Protocol(msg),
        }
    }
}
