//! Client-side error type.

use thiserror::Error;

/// Errors surfaced by [`BlogClient`](crate::BlogClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connect failure, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The server rejected the request with a problem body.
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of an API rejection, `None` for the other variants.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
