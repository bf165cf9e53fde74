//! The remote classification capability.

use crate::intake::ImagePayload;
use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures from the remote classifier.
///
/// These are failures of the call itself. A service that answers with an
/// `"Error:"`-prefixed reply has succeeded at the transport level; that
/// case belongs to the interpreter, not here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The service could not be reached or the connection failed.
    #[error("network failure: {0}")]
    Network(String),
    /// The service answered with something the client could not use.
    #[error("protocol failure: {0}")]
    Protocol(String),
    /// The call did not complete within the configured deadline.
    #[error("remote call timed out")]
    Timeout,
}

/// An opaque remote classification capability.
///
/// Given an image, returns the service's raw reply text or fails at the
/// transport level. One attempt per call; any retry policy belongs to
/// the caller.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Classifies an image, returning the service's raw reply text.
    async fn classify(&self, image: &ImagePayload) -> Result<String, TransportError>;
}
