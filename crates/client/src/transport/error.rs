//! Transport error types.

use std::sync::Arc;

/// Errors from the network transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other network-level failure, including body decode errors.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Network(Arc::new(err))
        }
    }
}
