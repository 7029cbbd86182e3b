//! Error types for the session client.

use parley_core::error::ParleyError;

/// Errors from backend REST calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// body decode).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Server returned HTTP {status} from {endpoint}")]
    Server { status: u16, endpoint: String },
}

impl From<ClientError> for ParleyError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(e) => ParleyError::Network(e.to_string()),
            ClientError::Server { status, endpoint } => {
                ParleyError::Server { status, endpoint }
            }
        }
    }
}
